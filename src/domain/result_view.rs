//! Result panel model: what a prediction response looks like on screen.

use chrono::{DateTime, Utc};

use super::prediction::{ConfidenceTier, PredictionResponse};

/// Total length of the gauge arc, in stroke units.
///
/// An offset equal to this value draws an empty arc; zero draws it full.
pub const TOTAL_ARC_LENGTH: f64 = 157.0;

/// Stroke offset of the gauge arc for a confidence percentage.
///
/// Confidence is clamped to `[0, 100]`; anything that is not a number
/// draws an empty arc.
#[must_use]
pub fn gauge_offset(confidence: f64) -> f64 {
    let c = if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 100.0)
    };
    TOTAL_ARC_LENGTH - TOTAL_ARC_LENGTH * c / 100.0
}

/// Split a recommendation string into bullets.
///
/// Separators are `;`, `.` and newline. Segments are trimmed, empty ones
/// dropped, order kept, duplicates kept.
#[must_use]
pub fn bullets_from_recommendation(text: &str) -> Vec<String> {
    text.split([';', '.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Label text with its confidence-tier marker.
#[must_use]
pub fn label_with_tier(label: &str, confidence: f64) -> String {
    format!(
        "{label} {}",
        ConfidenceTier::from_confidence(confidence).marker()
    )
}

/// Confidence percentage as displayed, e.g. `82%` or `82.5%`.
#[must_use]
pub fn confidence_text(confidence: f64) -> String {
    format!("{confidence}%")
}

/// Rendered prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label: String,
    pub confidence: f64,
    pub confidence_text: String,
    /// Progress bar width in percent
    pub bar_width: f64,
    pub recommendations: Vec<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub visible: bool,
}

impl Default for ResultView {
    fn default() -> Self {
        Self {
            label: String::new(),
            confidence: 0.0,
            confidence_text: confidence_text(0.0),
            bar_width: 0.0,
            recommendations: Vec::new(),
            received_at: None,
            visible: false,
        }
    }
}

impl ResultView {
    /// Project a response onto the panel. The panel stays hidden until the
    /// caller reveals it.
    #[must_use]
    pub fn from_response(response: &PredictionResponse, received_at: DateTime<Utc>) -> Self {
        Self {
            label: label_with_tier(&response.label, response.confidence),
            confidence: response.confidence,
            confidence_text: confidence_text(response.confidence),
            bar_width: response.confidence,
            recommendations: bullets_from_recommendation(&response.recommendation),
            received_at: Some(received_at),
            visible: false,
        }
    }

    #[must_use]
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }
}
