//! Rule variants and dynamic dispatch
//!
//! A field's rules are keyed by name. Six names are built in; any other name
//! is only meaningful when its value is a predicate. [`Rule::resolve`] turns a
//! raw `(name, value)` pair into a [`Rule`], or drops it.

use std::fmt;
use std::rc::Rc;

use regex::Regex;

use crate::error::RuleError;
use crate::numeric::{max_fails, min_fails};
use crate::string::{max_length_fails, min_length_fails, regex_fails, required_fails};

pub const REQUIRED: &str = "required";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const REGEX: &str = "regex";

/// Names handled by the built-in rules, in canonical order
pub const BUILTIN_RULES: [&str; 6] = [REQUIRED, MIN_LENGTH, MAX_LENGTH, MIN, MAX, REGEX];

/// A user-supplied check. Returns `true` when the value is acceptable.
///
/// Evaluation is single-threaded, so the closure may capture `Rc`/`Cell`
/// state. Panics raised by the closure are not caught anywhere in this crate.
#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn(&str) -> bool>);

impl Predicate {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        Self(Rc::new(check))
    }

    pub fn test(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// One validation check attached to a field
#[derive(Debug, Clone)]
pub enum Rule {
    /// Trimmed value must be non-empty (when `true`)
    Required(bool),
    MinLength(usize),
    MaxLength(usize),
    /// Value parsed as a number must be at least this
    Min(f64),
    /// Value parsed as a number must be at most this
    Max(f64),
    /// Pattern must match somewhere in the value
    Regex(Regex),
    Custom(Predicate),
}

/// Untyped value attached to a rule name before dispatch
#[derive(Debug, Clone)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Pattern(Regex),
    Predicate(Predicate),
}

impl Rule {
    /// Dispatches a raw rule.
    ///
    /// Built-in names take priority when the value has the matching kind.
    /// Anything else becomes a custom rule if the value is a predicate and is
    /// ignored (`Ok(None)`) otherwise. The only error is a `regex` rule whose
    /// text pattern does not compile.
    pub fn resolve(name: &str, value: RuleValue) -> Result<Option<Rule>, RuleError> {
        let rule = match (name, value) {
            (REQUIRED, RuleValue::Bool(on)) => Some(Rule::Required(on)),
            (MIN_LENGTH, RuleValue::Number(n)) if is_length(n) => Some(Rule::MinLength(n as usize)),
            (MAX_LENGTH, RuleValue::Number(n)) if is_length(n) => Some(Rule::MaxLength(n as usize)),
            (MIN, RuleValue::Number(n)) if !n.is_nan() => Some(Rule::Min(n)),
            (MAX, RuleValue::Number(n)) if !n.is_nan() => Some(Rule::Max(n)),
            (REGEX, RuleValue::Pattern(pattern)) => Some(Rule::Regex(pattern)),
            (REGEX, RuleValue::Text(pattern)) => {
                let compiled = Regex::new(&pattern).map_err(|source| RuleError::InvalidPattern {
                    name: name.to_string(),
                    source,
                })?;
                Some(Rule::Regex(compiled))
            }
            (_, RuleValue::Predicate(predicate)) => Some(Rule::Custom(predicate)),
            (_, other) => {
                tracing::debug!(rule = name, value = ?other, "ignoring rule without a usable value");
                None
            }
        };

        Ok(rule)
    }

    /// Canonical name of a built-in rule; `None` for custom predicates
    pub fn builtin_name(&self) -> Option<&'static str> {
        match self {
            Rule::Required(_) => Some(REQUIRED),
            Rule::MinLength(_) => Some(MIN_LENGTH),
            Rule::MaxLength(_) => Some(MAX_LENGTH),
            Rule::Min(_) => Some(MIN),
            Rule::Max(_) => Some(MAX),
            Rule::Regex(_) => Some(REGEX),
            Rule::Custom(_) => None,
        }
    }

    /// Returns `true` when `value` violates this rule
    pub fn fails(&self, value: &str) -> bool {
        match self {
            Rule::Required(on) => *on && required_fails(value),
            Rule::MinLength(min) => min_length_fails(value, *min),
            Rule::MaxLength(max) => max_length_fails(value, *max),
            Rule::Min(min) => min_fails(value, *min),
            Rule::Max(max) => max_fails(value, *max),
            Rule::Regex(pattern) => regex_fails(value, pattern),
            Rule::Custom(predicate) => !predicate.test(value),
        }
    }
}

fn is_length(n: f64) -> bool {
    n.is_finite() && n >= 0.0 && n.fract() == 0.0
}
