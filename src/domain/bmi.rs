//! Derived BMI field.

use super::form::{parse_number, FormState, BMI_FIELD, HEIGHT_FIELD, WEIGHT_FIELD};

/// Body mass index from height in centimetres and weight in kilograms.
///
/// Returns `None` unless both inputs are finite and the height is positive.
#[must_use]
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm.is_finite() && height_cm > 0.0 && weight_kg.is_finite()) {
        return None;
    }
    let meters = height_cm / 100.0;
    Some(weight_kg / (meters * meters))
}

/// Display form of a BMI value, two decimal places.
#[must_use]
pub fn format_bmi(bmi: f64) -> String {
    format!("{bmi:.2}")
}

/// Whether an edit to `field` should trigger a BMI recalculation.
#[must_use]
pub fn is_bmi_source(field: &str) -> bool {
    field == HEIGHT_FIELD || field == WEIGHT_FIELD
}

impl FormState {
    /// Recompute the BMI field from height and weight.
    ///
    /// Leaves the BMI field untouched when either source is empty or not a
    /// number, or when the height is not positive. Never flags an error.
    /// Returns the new value when one was written.
    pub fn recalc_bmi(&mut self) -> Option<f64> {
        let height = self.value(HEIGHT_FIELD).and_then(parse_number)?;
        let weight = self.value(WEIGHT_FIELD).and_then(parse_number)?;
        let bmi = compute_bmi(height, weight)?;
        let field = self.field_mut(BMI_FIELD)?;
        field.value = format_bmi(bmi);
        Some(bmi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi() {
        let bmi = compute_bmi(170.0, 65.0).expect("valid inputs");
        assert!((bmi - 22.491_349_480_968_86).abs() < 1e-9);
        assert_eq!(format_bmi(bmi), "22.49");
    }

    #[test]
    fn test_compute_bmi_rejects_bad_height() {
        assert!(compute_bmi(0.0, 70.0).is_none());
        assert!(compute_bmi(-170.0, 70.0).is_none());
        assert!(compute_bmi(f64::NAN, 70.0).is_none());
        assert!(compute_bmi(170.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_recalc_writes_two_decimals() {
        let mut form = FormState::default();
        form.set_value(HEIGHT_FIELD, "180");
        form.set_value(WEIGHT_FIELD, "81");
        assert!(form.recalc_bmi().is_some());
        assert_eq!(form.value(BMI_FIELD), Some("25.00"));
        assert!(!form.field(BMI_FIELD).expect("BMI").error);
    }

    #[test]
    fn test_recalc_leaves_value_on_invalid_input() {
        let mut form = FormState::default();
        form.set_value(BMI_FIELD, "31.20");
        form.set_value(HEIGHT_FIELD, "0");
        form.set_value(WEIGHT_FIELD, "90");
        assert!(form.recalc_bmi().is_none());
        assert_eq!(form.value(BMI_FIELD), Some("31.20"));

        form.set_value(HEIGHT_FIELD, "17x");
        assert!(form.recalc_bmi().is_none());
        assert_eq!(form.value(BMI_FIELD), Some("31.20"));

        form.set_value(HEIGHT_FIELD, "");
        form.set_value(WEIGHT_FIELD, "");
        assert!(form.recalc_bmi().is_none());
        assert_eq!(form.value(BMI_FIELD), Some("31.20"));
    }

    #[test]
    fn test_bmi_sources() {
        assert!(is_bmi_source("height"));
        assert!(is_bmi_source("weight"));
        assert!(!is_bmi_source("BMI"));
        assert!(!is_bmi_source("age"));
    }
}
