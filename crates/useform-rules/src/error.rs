//! Error types for rule construction

use thiserror::Error;

/// Raised while building a [`ValidationSpec`](crate::ValidationSpec).
///
/// Evaluation itself never fails: a failing rule is an entry in
/// [`Errors`](crate::Errors), not an error.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A `regex` rule was given a pattern that does not compile
    #[error("invalid pattern for rule `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}
