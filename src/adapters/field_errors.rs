//! Error renderer that annotates form fields with server-side messages.

use crate::domain::FormState;
use crate::ports::ErrorRenderer;

/// Maps a `{field: message}` object onto the form: each named field is
/// flagged and gets the message as its tooltip. Anything that is not an
/// object, and keys that name no field, are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldErrorRenderer;

impl ErrorRenderer for FieldErrorRenderer {
    fn render_errors(&self, errors: &serde_json::Value, form: &mut FormState) {
        let Some(map) = errors.as_object() else {
            return;
        };
        for (name, message) in map {
            let Some(field) = form.field_mut(name) else {
                tracing::debug!("Server reported an error for unknown field {}", name);
                continue;
            };
            field.error = true;
            field.title = match message {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
        }
    }
}
