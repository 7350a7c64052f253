// File: useform/src/field.rs
// Purpose: Per-field state and registration options

use serde::Serialize;
use useform_rules::{Errors, ValidationSpec};

/// Options passed when registering a field
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Initial value for a newly registered field (default: empty)
    pub default_value: Option<String>,
    pub validations: Option<ValidationSpec>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn validations(mut self, spec: ValidationSpec) -> Self {
        self.validations = Some(spec);
        self
    }
}

/// Tracked state of one field
///
/// `errors` is `None` until the first change or blur; afterwards it always
/// reflects the current `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub errors: Option<Errors>,
}

impl FieldState {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            touched: false,
            errors: None,
        }
    }

    /// True when evaluated and at least one rule failed
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}
