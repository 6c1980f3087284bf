//! Prediction port: the one outbound exchange with the prediction service.

use crate::domain::{ErrorBody, PredictionRequest, PredictionResponse};

/// What the service answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// 2xx with a parsed prediction
    Success(PredictionResponse),
    /// Non-2xx with a parsed error body
    Rejected { status: u16, body: ErrorBody },
}

/// The exchange never produced a parsed answer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Malformed response body: {0}")]
    Decode(String),
}

/// Trait for submitting a prediction request.
///
/// Implementations perform exactly one request per call, with no retry,
/// cancellation or timeout.
pub trait PredictionClient: Send + Sync {
    /// Submit the payload and wait for the answer.
    ///
    /// # Errors
    /// Returns `TransportError` when the request could not be sent or the
    /// body could not be parsed, whatever the status code.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, TransportError>;
}
