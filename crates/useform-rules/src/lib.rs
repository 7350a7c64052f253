//! useform Rules
//!
//! The stateless half of useform: given a field's raw value and its
//! [`ValidationSpec`], [`evaluate`] reports which rules fail.
//!
//! Built-in rules are `required`, `minLength`, `maxLength`, `min`, `max` and
//! `regex`. Any other name carries a custom [`Predicate`].

pub mod error;
pub mod evaluate;
pub mod numeric;
pub mod rule;
pub mod spec;
pub mod string;

pub use error::RuleError;
pub use evaluate::{evaluate, evaluate_opt, Errors};
pub use rule::{Predicate, Rule, RuleValue, BUILTIN_RULES};
pub use spec::ValidationSpec;
