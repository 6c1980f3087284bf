//! Domain layer: form model, validation and prediction types.
//!
//! Pure types with no I/O. Everything here is unit-testable without a
//! terminal or a network.

mod bmi;
mod form;
mod prediction;
mod result_view;
mod validation;

pub use bmi::{compute_bmi, format_bmi, is_bmi_source};
pub use form::{
    parse_number, Choice, FieldKind, FormField, FormState, BMI_FIELD, HEIGHT_FIELD, WEIGHT_FIELD,
};
pub use prediction::{
    ConfidenceTier, ErrorBody, PredictionRequest, PredictionResponse, PREDICTION_FAILED,
};
pub use result_view::{
    bullets_from_recommendation, confidence_text, gauge_offset, label_with_tier, ResultView,
    TOTAL_ARC_LENGTH,
};
pub use validation::{validate, ValidationError};
