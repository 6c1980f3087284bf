//! Error-renderer port: surfaces server-side field errors.

use crate::domain::FormState;

/// Strategy for showing field-level errors from a rejected prediction.
///
/// Receives the `errors` (or, failing that, `details`) payload as sent by
/// the server together with the form it may annotate.
pub trait ErrorRenderer {
    fn render_errors(&self, errors: &serde_json::Value, form: &mut FormState);
}

/// Renderer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopErrorRenderer;

impl ErrorRenderer for NoopErrorRenderer {
    fn render_errors(&self, _errors: &serde_json::Value, _form: &mut FormState) {}
}
