// File: useform/src/form.rs
// Purpose: Field state tracker - registration, change/blur handling, form-level queries

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use useform_rules::{evaluate_opt, Errors, ValidationSpec};

use crate::error::FormError;
use crate::field::{FieldOptions, FieldState};

/// When errors are surfaced to the binding layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Errors are visible as soon as they are computed
    #[default]
    OnChange,
    /// Errors stay hidden until the field has been blurred once
    OnTouched,
}

struct FieldEntry {
    state: FieldState,
    default_value: String,
    validations: Option<Rc<ValidationSpec>>,
}

struct FormState {
    fields: BTreeMap<String, FieldEntry>,
    mode: ValidationMode,
}

type SharedState = Rc<RefCell<FormState>>;

/// State of one form: every registered field keyed by name.
///
/// Each `Form` owns its fields; two forms never share state. Handlers
/// returned from [`Form::register`] point back into the same form.
///
/// ```
/// use useform::{FieldOptions, Form};
/// use useform::rules::ValidationSpec;
///
/// let form = Form::new();
/// let options = FieldOptions::new().validations(ValidationSpec::new().required(true));
///
/// let field = form.register("name", options.clone());
/// field.props.on_blur.call().unwrap();
///
/// let field = form.register("name", options);
/// assert!(field.touched);
/// assert!(field.error("required"));
/// ```
pub struct Form {
    state: SharedState,
}

impl Form {
    pub fn new() -> Self {
        Self::with_mode(ValidationMode::default())
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            state: Rc::new(RefCell::new(FormState {
                fields: BTreeMap::new(),
                mode,
            })),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.state.borrow().mode
    }

    /// Registers a field and returns what a binding layer needs to render it.
    ///
    /// A new name starts with `default_value` (or empty), untouched and
    /// unevaluated. A known name keeps its value, touched flag and errors;
    /// only its validations and default value are replaced.
    pub fn register(&self, name: &str, options: FieldOptions) -> Registration {
        let FieldOptions {
            default_value,
            validations,
        } = options;
        let validations = validations.map(Rc::new);

        let (state, mode) = {
            let mut inner = self.state.borrow_mut();
            let mode = inner.mode;
            if let Some(entry) = inner.fields.get_mut(name) {
                debug!(field = name, "re-registering field");
                entry.validations = validations;
                if let Some(default_value) = default_value {
                    entry.default_value = default_value;
                }
                (entry.state.clone(), mode)
            } else {
                debug!(field = name, "registering field");
                let default_value = default_value.unwrap_or_default();
                let state = FieldState::new(default_value.clone());
                inner.fields.insert(
                    name.to_string(),
                    FieldEntry {
                        state: state.clone(),
                        default_value,
                        validations,
                    },
                );
                (state, mode)
            }
        };

        Registration::new(name, state, mode, &self.state)
    }

    /// Stores a new value and re-evaluates the field's rules
    pub fn change(&self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        change_field(&self.state, name, value.into())
    }

    /// Marks the field touched and re-evaluates its current value
    pub fn blur(&self, name: &str) -> Result<(), FormError> {
        blur_field(&self.state, name)
    }

    pub fn field(&self, name: &str) -> Option<FieldState> {
        self.state
            .borrow()
            .fields
            .get(name)
            .map(|entry| entry.state.clone())
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.field(name).map(|state| state.value)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.field(name).is_some_and(|state| state.touched)
    }

    /// Last computed errors, regardless of the validation mode
    pub fn errors(&self, name: &str) -> Option<Errors> {
        self.field(name).and_then(|state| state.errors)
    }

    /// Errors as the binding layer should show them under the current mode
    pub fn visible_errors(&self, name: &str) -> Option<Errors> {
        let mode = self.mode();
        self.field(name)
            .and_then(|state| surface(mode, state.touched, state.errors))
    }

    /// Current values of all fields, keyed by name
    pub fn values(&self) -> BTreeMap<String, String> {
        self.state
            .borrow()
            .fields
            .iter()
            .map(|(name, entry)| (name.clone(), entry.state.value.clone()))
            .collect()
    }

    /// Registered field names in sorted order
    pub fn field_names(&self) -> Vec<String> {
        self.state.borrow().fields.keys().cloned().collect()
    }

    /// True when every field's current value passes all of its rules.
    ///
    /// Runs a fresh evaluation per field, so fields that were never changed
    /// or blurred are checked too. Stored errors are left untouched.
    pub fn is_valid(&self) -> bool {
        let snapshot: Vec<(String, Option<Rc<ValidationSpec>>)> = self
            .state
            .borrow()
            .fields
            .values()
            .map(|entry| (entry.state.value.clone(), entry.validations.clone()))
            .collect();

        snapshot
            .iter()
            .all(|(value, spec)| evaluate_opt(value, spec.as_deref()).is_empty())
    }

    /// Returns every field to its default value, untouched and unevaluated
    pub fn reset(&self) {
        let mut inner = self.state.borrow_mut();
        debug!(fields = inner.fields.len(), "resetting form");
        for entry in inner.fields.values_mut() {
            entry.state = FieldState::new(entry.default_value.clone());
        }
    }

    pub fn reset_field(&self, name: &str) -> Result<(), FormError> {
        let mut inner = self.state.borrow_mut();
        let entry = inner
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        debug!(field = name, "resetting field");
        entry.state = FieldState::new(entry.default_value.clone());
        Ok(())
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.state.borrow();
        f.debug_struct("Form")
            .field("mode", &inner.mode)
            .field("fields", &inner.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn surface(mode: ValidationMode, touched: bool, errors: Option<Errors>) -> Option<Errors> {
    match mode {
        ValidationMode::OnChange => errors,
        ValidationMode::OnTouched if touched => errors,
        ValidationMode::OnTouched => None,
    }
}

fn change_field(state: &SharedState, name: &str, value: String) -> Result<(), FormError> {
    debug!(field = name, "field changed");
    update_field(state, name, FieldEvent::Change(value))
}

fn blur_field(state: &SharedState, name: &str) -> Result<(), FormError> {
    debug!(field = name, "field blurred");
    update_field(state, name, FieldEvent::Blur)
}

enum FieldEvent {
    Change(String),
    Blur,
}

/// Evaluates the value the event leaves behind, then commits the event and
/// its errors in one step.
///
/// Rules run with no borrow held, so a predicate may read (or even write) the
/// form. A panicking predicate leaves the field exactly as it was.
fn update_field(state: &SharedState, name: &str, event: FieldEvent) -> Result<(), FormError> {
    let (value, spec) = {
        let inner = state.borrow();
        let entry = inner
            .fields
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let value = match &event {
            FieldEvent::Change(value) => value.clone(),
            FieldEvent::Blur => entry.state.value.clone(),
        };
        (value, entry.validations.clone())
    };

    let errors = evaluate_opt(&value, spec.as_deref());
    debug!(field = name, failed = errors.len(), "field evaluated");

    let mut inner = state.borrow_mut();
    let entry = inner
        .fields
        .get_mut(name)
        .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
    match event {
        FieldEvent::Change(_) => {
            entry.state.value = value;
            entry.state.errors = Some(errors);
        }
        FieldEvent::Blur => {
            entry.state.touched = true;
            // A predicate may have changed the value meanwhile; its own event
            // already stored errors for that value.
            if entry.state.value == value {
                entry.state.errors = Some(errors);
            }
        }
    }
    Ok(())
}

/// Descriptor returned by [`Form::register`]
#[derive(Debug, Clone)]
pub struct Registration {
    /// Spread onto the input control
    pub props: InputProps,
    pub touched: bool,
    /// Errors to render; gated on `touched` under [`ValidationMode::OnTouched`]
    pub errors: Option<Errors>,
}

impl Registration {
    fn new(name: &str, state: FieldState, mode: ValidationMode, shared: &SharedState) -> Self {
        let FieldState {
            value,
            touched,
            errors,
        } = state;

        Self {
            props: InputProps {
                name: name.to_string(),
                value,
                on_change: ChangeHandler {
                    state: Rc::clone(shared),
                    field: name.to_string(),
                },
                on_blur: BlurHandler {
                    state: Rc::clone(shared),
                    field: name.to_string(),
                },
            },
            touched,
            errors: surface(mode, touched, errors),
        }
    }

    /// True when the named rule currently fails
    pub fn error(&self, rule: &str) -> bool {
        self.errors.as_ref().is_some_and(|errors| errors[rule])
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

/// Value and event handlers for an input-like control
#[derive(Debug, Clone)]
pub struct InputProps {
    pub name: String,
    pub value: String,
    pub on_change: ChangeHandler,
    pub on_blur: BlurHandler,
}

/// Feeds a new raw value into the form
#[derive(Clone)]
pub struct ChangeHandler {
    state: SharedState,
    field: String,
}

impl ChangeHandler {
    pub fn call(&self, value: impl Into<String>) -> Result<(), FormError> {
        change_field(&self.state, &self.field, value.into())
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHandler").field("field", &self.field).finish()
    }
}

/// Marks the field touched
#[derive(Clone)]
pub struct BlurHandler {
    state: SharedState,
    field: String,
}

impl BlurHandler {
    pub fn call(&self) -> Result<(), FormError> {
        blur_field(&self.state, &self.field)
    }
}

impl fmt::Debug for BlurHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlurHandler").field("field", &self.field).finish()
    }
}
