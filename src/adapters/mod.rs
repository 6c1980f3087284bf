//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the prediction service
//! - `field_errors`: maps server field errors onto the form
//! - `sanitize`: health-data filtering for logs

pub mod field_errors;
pub mod http;
pub mod sanitize;

pub use field_errors::FieldErrorRenderer;
pub use http::{HttpClientError, HttpPredictionClient};
