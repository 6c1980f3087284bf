//! Ports layer: Trait definitions for external collaborators.
//!
//! The controller only talks to the prediction service and to the
//! field-error renderer through these traits.

mod error_renderer;
mod predictor;

pub use error_renderer::{ErrorRenderer, NoopErrorRenderer};
pub use predictor::{PredictionClient, PredictionOutcome, TransportError};
