//! # Cardiocheck
//!
//! Terminal client for a cardiovascular risk prediction service.
//!
//! This crate provides:
//! - A health-metrics form with derived BMI and client-side validation
//! - A single JSON exchange with the prediction service
//! - An animated result panel (tiered label, confidence gauge, advice)
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Form model, validation, request and response types
//! - `ports`: Trait definitions for the service and the error renderer
//! - `adapters`: Concrete implementations (reqwest, field errors, log sanitizer)
//! - `application`: The form controller and its animations
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{FormController, UiMode};
pub use config::Config;
pub use domain::{FormState, PredictionRequest, PredictionResponse, ValidationError};

/// Result type for Cardiocheck operations
pub type Result<T> = std::result::Result<T, CardiocheckError>;

/// Main error type for Cardiocheck
#[derive(Debug, thiserror::Error)]
pub enum CardiocheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] adapters::HttpClientError),

    #[error("Prediction exchange failed: {0}")]
    Transport(#[from] ports::TransportError),

    #[error("Invalid form data: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
