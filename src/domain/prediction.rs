//! Wire types for the prediction exchange.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Field-name to number mapping sent to the prediction service.
///
/// Keeps insertion order so the JSON body lists fields in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRequest {
    values: Vec<(String, f64)>,
}

impl PredictionRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.values.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Successful (2xx) prediction body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: String,
    /// Percentage, nominally 0-100
    pub confidence: f64,
    pub recommendation: String,
}

/// Body of a rejected (non-2xx) prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub trace: Option<serde_json::Value>,
}

/// Message shown when the server gives no usable `error` text.
pub const PREDICTION_FAILED: &str = "Prediction failed";

impl ErrorBody {
    /// Field-level errors to hand to the error renderer: `errors` when
    /// present, otherwise `details`.
    #[must_use]
    pub fn field_errors(&self) -> Option<&serde_json::Value> {
        self.errors.as_ref().or(self.details.as_ref())
    }

    /// User-facing message, falling back to a generic one.
    #[must_use]
    pub fn message(&self) -> &str {
        match self.error.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => PREDICTION_FAILED,
        }
    }
}

/// Display emphasis of a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// 70 and above
    High,
    /// 40 up to 70
    Medium,
    /// Below 40 (or not a number)
    Low,
}

impl ConfidenceTier {
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            Self::High
        } else if confidence >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Marker appended to the result label.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::High => "🎯",
            Self::Medium => "⚠️",
            Self::Low => "🌿",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_in_insertion_order() {
        let mut req = PredictionRequest::new();
        req.insert("weight", 82.5);
        req.insert("age", 54.0);
        req.insert("weight", 80.0);
        let json = serde_json::to_string(&req).expect("serialize");
        assert_eq!(json, r#"{"weight":80.0,"age":54.0}"#);
        assert_eq!(req.len(), 2);
        assert_eq!(req.get("age"), Some(54.0));
    }

    #[test]
    fn test_error_body_message_fallback() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"bad input"}"#).expect("parse");
        assert_eq!(body.message(), "bad input");
        assert!(body.field_errors().is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"error":""}"#).expect("parse");
        assert_eq!(body.message(), PREDICTION_FAILED);

        let body: ErrorBody = serde_json::from_str("{}").expect("parse");
        assert_eq!(body.message(), PREDICTION_FAILED);
    }

    #[test]
    fn test_error_body_prefers_errors_over_details() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"Validation failed","errors":{"age":"Missing value"},"details":"x"}"#,
        )
        .expect("parse");
        assert_eq!(
            body.field_errors(),
            Some(&serde_json::json!({"age": "Missing value"}))
        );

        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Model not found","details":"final.onnx"}"#)
                .expect("parse");
        assert_eq!(body.field_errors(), Some(&serde_json::json!("final.onnx")));
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_confidence(70.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(69.9), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(40.0), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(39.9), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_confidence(f64::NAN), ConfidenceTier::Low);
    }
}
