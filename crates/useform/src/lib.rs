//! # useform
//!
//! Form state for UI bindings: field values, touched flags and per-field
//! validation errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use useform::{FieldOptions, Form};
//! use useform::rules::ValidationSpec;
//!
//! let form = Form::new();
//! let options = FieldOptions::new()
//!     .validations(ValidationSpec::new().required(true).min_length(3));
//!
//! // Bind `props` onto an input control
//! let field = form.register("username", options.clone());
//! field.props.on_change.call("ab").unwrap();
//! field.props.on_blur.call().unwrap();
//!
//! // Next render
//! let field = form.register("username", options);
//! assert!(field.touched);
//! assert!(!field.error("required"));
//! assert!(field.error("minLength"));
//! ```
//!
//! ## Architecture
//!
//! - **`useform-rules`** - the pure rule evaluator, re-exported as [`rules`]
//! - **[`form`]** - the field state tracker behind [`Form::register`]
//! - **[`config`]** - forms declared in `useform.toml`

pub mod config;
pub mod error;
pub mod field;
pub mod form;

pub use config::{FieldConfig, FormConfig};
pub use error::FormError;
pub use field::{FieldOptions, FieldState};
pub use form::{BlurHandler, ChangeHandler, Form, InputProps, Registration, ValidationMode};

// Re-export the evaluator for access to specs, rules and errors
pub use useform_rules as rules;
pub use useform_rules::{evaluate, Errors, ValidationSpec};
