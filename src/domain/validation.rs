//! Client-side validation gate.
//!
//! Walks the form in display order and stops at the first offending field,
//! which is the only one flagged.

use super::form::{parse_number, FormState};
use super::prediction::PredictionRequest;

/// Why a submission was blocked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Editable field left empty
    #[error("{field} is required")]
    Missing { field: String },

    /// Value does not parse to a finite number
    #[error("Invalid value for {field}")]
    NotNumeric { field: String },

    /// Numeric input outside its inclusive bounds
    #[error("{field} must be between {} and {}", bound(.min), bound(.max))]
    OutOfRange {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn bound(value: &Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::NotNumeric { field } | Self::OutOfRange { field, .. } => {
                field
            }
        }
    }

    /// Message to alert the user with. Missing fields are only flagged.
    #[must_use]
    pub fn alert_message(&self) -> Option<String> {
        match self {
            Self::Missing { .. } => None,
            _ => Some(self.to_string()),
        }
    }
}

/// Validate every field and collect the request payload.
///
/// Clears all error flags first; on failure flags exactly the first
/// offending field and returns without building a partial request.
///
/// # Errors
/// Returns the first [`ValidationError`] encountered.
pub fn validate(form: &mut FormState) -> Result<PredictionRequest, ValidationError> {
    form.clear_errors();

    let mut request = PredictionRequest::new();
    for field in form.fields.iter_mut() {
        if field.value.is_empty() && !field.readonly {
            field.error = true;
            return Err(ValidationError::Missing {
                field: field.name.to_string(),
            });
        }

        // An empty derived field reads as zero and falls to the range check.
        let parsed = if field.readonly && field.value.trim().is_empty() {
            Some(0.0)
        } else {
            parse_number(&field.value)
        };
        let Some(value) = parsed else {
            field.error = true;
            return Err(ValidationError::NotNumeric {
                field: field.name.to_string(),
            });
        };

        let (min, max) = field.bounds();
        let below = min.is_some_and(|m| value < m);
        let above = max.is_some_and(|m| value > m);
        if below || above {
            field.error = true;
            return Err(ValidationError::OutOfRange {
                field: field.name.to_string(),
                min,
                max,
            });
        }

        request.insert(field.name, value);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{FieldKind, FormField};

    fn filled_form() -> FormState {
        let mut form = FormState::default();
        form.load_sample_data();
        form.recalc_bmi();
        form
    }

    fn flagged(form: &FormState) -> Vec<&str> {
        form.fields
            .iter()
            .filter(|f| f.error)
            .map(|f| f.name)
            .collect()
    }

    #[test]
    fn test_valid_form_builds_full_request() {
        let mut form = filled_form();
        let request = validate(&mut form).expect("valid form");
        assert_eq!(request.len(), form.fields.len());
        assert_eq!(request.get("age"), Some(54.0));
        assert_eq!(request.get("BMI"), Some(28.57));
        let keys: Vec<&str> = request.iter().map(|(k, _)| k).collect();
        let names: Vec<&str> = form.fields.iter().map(|f| f.name).collect();
        assert_eq!(keys, names);
        assert!(flagged(&form).is_empty());
    }

    #[test]
    fn test_first_empty_field_wins() {
        let mut form = filled_form();
        form.set_value("ap_hi", "");
        form.set_value("height", "");
        let err = validate(&mut form).expect_err("should block");
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "ap_hi".to_string()
            }
        );
        assert!(err.alert_message().is_none());
        assert_eq!(flagged(&form), vec!["ap_hi"]);
    }

    #[test]
    fn test_non_numeric_alerts_with_field_name() {
        let mut form = filled_form();
        form.set_value("weight", "-");
        let err = validate(&mut form).expect_err("should block");
        assert_eq!(err.field(), "weight");
        assert_eq!(
            err.alert_message().as_deref(),
            Some("Invalid value for weight")
        );
        assert_eq!(flagged(&form), vec!["weight"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut form = filled_form();
        form.set_value("age", "1");
        form.set_value("ap_hi", "250");
        assert!(validate(&mut form).is_ok());

        form.set_value("ap_hi", "250.5");
        let err = validate(&mut form).expect_err("above max");
        assert_eq!(
            err.alert_message().as_deref(),
            Some("ap_hi must be between 70 and 250")
        );
        assert_eq!(flagged(&form), vec!["ap_hi"]);

        form.set_value("ap_hi", "140");
        form.set_value("age", "0");
        let err = validate(&mut form).expect_err("below min");
        assert_eq!(err.field(), "age");
    }

    #[test]
    fn test_previous_flags_cleared_on_next_pass() {
        let mut form = filled_form();
        form.set_value("age", "");
        assert!(validate(&mut form).is_err());
        form.set_value("age", "60");
        form.set_value("ap_lo", "10");
        let err = validate(&mut form).expect_err("ap_lo below min");
        assert_eq!(err.field(), "ap_lo");
        assert_eq!(flagged(&form), vec!["ap_lo"]);
    }

    #[test]
    fn test_empty_readonly_is_not_missing() {
        let mut form = FormState::default();
        form.load_sample_data();
        // no BMI recalculation: the read-only field stays empty
        let err = validate(&mut form).expect_err("empty BMI reads as zero");
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "BMI".to_string(),
                min: Some(10.0),
                max: Some(60.0),
            }
        );
        assert_eq!(
            err.alert_message().as_deref(),
            Some("BMI must be between 10 and 60")
        );
        assert_eq!(flagged(&form), vec!["BMI"]);
    }

    #[test]
    fn test_unbounded_numeric_field() {
        let mut form = FormState::new(vec![FormField {
            name: "score",
            label: "Score",
            hint: "",
            kind: FieldKind::Number {
                min: None,
                max: None,
            },
            readonly: false,
            value: "-1e6".to_string(),
            error: false,
            title: String::new(),
        }]);
        let request = validate(&mut form).expect("no bounds");
        assert_eq!(request.get("score"), Some(-1e6));
    }
}
