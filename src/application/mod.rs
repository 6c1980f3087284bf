//! Application layer: the form controller and its animations.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction flow.

mod animation;
mod confetti;
mod controller;

pub use animation::{Easing, GaugeArc, Transition};
pub use confetti::{particle_count, ParticleBurst, ParticleFrame, PALETTE, PARTICLE_LIFETIME};
pub use controller::{
    FormController, SubmitError, UiMode, ViewFocus, NETWORK_ERROR, PREDICTING_LABEL, PREDICT_LABEL,
};
