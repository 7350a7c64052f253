// File: useform/src/error.rs
// Purpose: Errors raised by the form tracker

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Change, blur or reset addressed a name that was never registered
    #[error("field `{0}` is not registered")]
    UnknownField(String),
}
