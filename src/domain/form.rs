//! Health-metrics form model.
//!
//! Field order is display order, validation order and payload order.
//! Defaults follow the cardiovascular dataset the prediction service was
//! trained on (age, blood pressure, lab categories, lifestyle flags).

use zeroize::Zeroize;

/// Payload key of the derived BMI field.
pub const BMI_FIELD: &str = "BMI";
/// Payload key of the height source field (cm).
pub const HEIGHT_FIELD: &str = "height";
/// Payload key of the weight source field (kg).
pub const WEIGHT_FIELD: &str = "weight";

/// One option of a select widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Widget kind of a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free numeric input with optional inclusive bounds.
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Fixed list of choices; always holds one of them.
    Select { choices: Vec<Choice> },
}

/// A single named form field.
#[derive(Debug, Clone)]
pub struct FormField {
    /// Payload key
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    /// Derived fields are not editable and are skipped by the empty check.
    pub readonly: bool,
    /// Current raw value as typed or selected
    pub value: String,
    /// Set by validation (or the server error renderer) on the offending field
    pub error: bool,
    /// Per-field tooltip text
    pub title: String,
}

impl FormField {
    fn number(
        name: &'static str,
        label: &'static str,
        hint: &'static str,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name,
            label,
            hint,
            kind: FieldKind::Number {
                min: Some(min),
                max: Some(max),
            },
            readonly: false,
            value: String::new(),
            error: false,
            title: String::new(),
        }
    }

    fn select(name: &'static str, label: &'static str, choices: &[Choice]) -> Self {
        let value = choices
            .first()
            .map(|c| c.value.to_string())
            .unwrap_or_default();
        Self {
            name,
            label,
            hint: "",
            kind: FieldKind::Select {
                choices: choices.to_vec(),
            },
            readonly: false,
            value,
            error: false,
            title: String::new(),
        }
    }

    fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select { .. })
    }

    /// Declared bounds of a numeric input; selects carry none.
    #[must_use]
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self.kind {
            FieldKind::Number { min, max, .. } => (min, max),
            FieldKind::Select { .. } => (None, None),
        }
    }

    /// Label of the currently selected choice, if this is a select.
    #[must_use]
    pub fn selected_choice_label(&self) -> Option<&'static str> {
        match &self.kind {
            FieldKind::Select { choices } => choices
                .iter()
                .find(|c| c.value == self.value)
                .map(|c| c.label),
            FieldKind::Number { .. } => None,
        }
    }

    /// Restore the initial value: first choice for selects, empty otherwise.
    fn restore_initial(&mut self) {
        self.value.zeroize();
        if let FieldKind::Select { choices } = &self.kind {
            if let Some(first) = choices.first() {
                self.value.push_str(first.value);
            }
        }
    }

    /// Step to the next/previous choice of a select. No-op for inputs.
    fn cycle_choice(&mut self, forward: bool) {
        let FieldKind::Select { choices } = &self.kind else {
            return;
        };
        if choices.is_empty() {
            return;
        }
        let current = choices.iter().position(|c| c.value == self.value);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(0), false) => choices.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.value = choices[next].value.to_string();
    }
}

const LEVEL_CHOICES: [Choice; 3] = [
    Choice { value: "1", label: "normal" },
    Choice { value: "2", label: "above normal" },
    Choice { value: "3", label: "well above normal" },
];

const GENDER_CHOICES: [Choice; 2] = [
    Choice { value: "1", label: "Female" },
    Choice { value: "2", label: "Male" },
];

const YES_NO_CHOICES: [Choice; 2] = [
    Choice { value: "0", label: "No" },
    Choice { value: "1", label: "Yes" },
];

/// The whole form: ordered fields plus the cursor.
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(vec![
            FormField::number("age", "Age", "years (1-120)", 1.0, 120.0),
            FormField::number("weight", "Weight", "kg (20-300)", 20.0, 300.0),
            FormField::number("ap_hi", "Systolic BP", "mmHg (70-250)", 70.0, 250.0),
            FormField::number("ap_lo", "Diastolic BP", "mmHg (40-150)", 40.0, 150.0),
            FormField::select("cholesterol", "Cholesterol", &LEVEL_CHOICES),
            FormField::select("gluc", "Glucose", &LEVEL_CHOICES),
            FormField::select("gender", "Gender", &GENDER_CHOICES),
            FormField::number("BMI", "BMI", "auto-calculated", 10.0, 60.0).readonly(),
            FormField::number("height", "Height", "cm (100-250)", 100.0, 250.0),
            FormField::select("smoke", "Smoker", &YES_NO_CHOICES),
            FormField::select("alco", "Alcohol use", &YES_NO_CHOICES),
            FormField::select("active", "Physically active", &YES_NO_CHOICES),
        ])
    }
}

impl FormState {
    /// Build a form from an explicit field list.
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    #[must_use]
    pub fn selected(&self) -> Option<&FormField> {
        self.fields.get(self.selected_field)
    }

    /// Overwrite a field value by name. Returns `false` if no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.fields.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Append a character to the selected numeric input.
    ///
    /// Returns the name of the edited field, if any.
    pub fn input_char(&mut self, c: char) -> Option<&'static str> {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return None;
        }
        let field = self.fields.get_mut(self.selected_field)?;
        if field.readonly || field.is_select() {
            return None;
        }
        field.value.push(c);
        Some(field.name)
    }

    /// Delete the last character of the selected numeric input.
    pub fn delete_char(&mut self) -> Option<&'static str> {
        let field = self.fields.get_mut(self.selected_field)?;
        if field.readonly || field.is_select() {
            return None;
        }
        field.value.pop();
        Some(field.name)
    }

    /// Clear the selected numeric input.
    pub fn clear_field(&mut self) -> Option<&'static str> {
        let field = self.fields.get_mut(self.selected_field)?;
        if field.readonly || field.is_select() {
            return None;
        }
        field.value.zeroize();
        Some(field.name)
    }

    /// Cycle the selected select field.
    pub fn cycle_choice(&mut self, forward: bool) -> Option<&'static str> {
        let field = self.fields.get_mut(self.selected_field)?;
        if field.readonly || !field.is_select() {
            return None;
        }
        field.cycle_choice(forward);
        Some(field.name)
    }

    /// Drop every error flag.
    pub fn clear_errors(&mut self) {
        for field in self.fields.iter_mut() {
            field.error = false;
        }
    }

    /// Return every editable field to its initial value and wipe all
    /// error flags and tooltips. Read-only fields keep their value.
    pub fn clear_for_reset(&mut self) {
        for field in self.fields.iter_mut() {
            if !field.readonly {
                field.restore_initial();
            }
            field.error = false;
            field.title.clear();
        }
    }

    /// Fill in a typical patient for quick demos.
    pub fn load_sample_data(&mut self) {
        let sample = [
            ("age", "54"),
            ("weight", "86.5"),
            ("ap_hi", "142"),
            ("ap_lo", "91"),
            ("cholesterol", "2"),
            ("gluc", "1"),
            ("gender", "2"),
            ("height", "174"),
            ("smoke", "1"),
            ("alco", "0"),
            ("active", "1"),
        ];
        for (name, value) in sample {
            self.set_value(name, value);
        }
    }
}

/// Coerce a raw field value to a finite number.
///
/// Surrounding whitespace is ignored; empty input, `NaN` and infinities
/// yield `None`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
