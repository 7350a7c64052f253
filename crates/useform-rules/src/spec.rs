//! Validation spec: the ordered, uniquely named rules of one field

use std::fmt;

use regex::Regex;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::RuleError;
use crate::rule::{Predicate, Rule, RuleValue, MAX, MAX_LENGTH, MIN, MIN_LENGTH, REGEX, REQUIRED};

/// Rules attached to a field at registration time.
///
/// Names are unique. Inserting a name that is already present replaces its
/// rule and keeps its position.
///
/// ```
/// use useform_rules::{evaluate, ValidationSpec};
///
/// let spec = ValidationSpec::new()
///     .required(true)
///     .min_length(3)
///     .custom("notAdmin", |v| v != "admin");
///
/// let errors = evaluate("ab", &spec);
/// assert!(!errors["required"]);
/// assert!(errors["minLength"]);
/// assert!(!errors["notAdmin"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationSpec {
    rules: Vec<(String, Rule)>,
}

impl ValidationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, on: bool) -> Self {
        self.with(REQUIRED, Rule::Required(on))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.with(MIN_LENGTH, Rule::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.with(MAX_LENGTH, Rule::MaxLength(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.with(MIN, Rule::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.with(MAX, Rule::Max(max))
    }

    pub fn regex(self, pattern: Regex) -> Self {
        self.with(REGEX, Rule::Regex(pattern))
    }

    /// Compiles `pattern` into a `regex` rule
    pub fn pattern(self, pattern: &str) -> Result<Self, RuleError> {
        self.with_raw(REGEX, RuleValue::Text(pattern.to_string()))
    }

    /// Adds a named predicate. The rule fails when `check` returns `false`.
    pub fn custom<F>(self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.with(name, Rule::Custom(Predicate::new(check)))
    }

    /// Builder form of [`insert_raw`](Self::insert_raw)
    pub fn with_raw(mut self, name: &str, value: RuleValue) -> Result<Self, RuleError> {
        self.insert_raw(name, value)?;
        Ok(self)
    }

    fn with(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Adds or replaces a rule
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> &mut Self {
        let name = name.into();
        match self.rules.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((name, rule)),
        }
        self
    }

    /// Adds a raw rule through [`Rule::resolve`].
    ///
    /// Returns `Ok(false)` when the value is not usable for that name and the
    /// rule was ignored.
    pub fn insert_raw(&mut self, name: &str, value: RuleValue) -> Result<bool, RuleError> {
        match Rule::resolve(name, value)? {
            Some(rule) => {
                self.insert(name, rule);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Plain values a config file can carry
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PlainValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<PlainValue> for RuleValue {
    fn from(value: PlainValue) -> Self {
        match value {
            PlainValue::Bool(b) => RuleValue::Bool(b),
            PlainValue::Number(n) => RuleValue::Number(n),
            PlainValue::Text(s) => RuleValue::Text(s),
        }
    }
}

struct SpecVisitor;

impl<'de> Visitor<'de> for SpecVisitor {
    type Value = ValidationSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of rule names to booleans, numbers or patterns")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut spec = ValidationSpec::new();
        while let Some((name, value)) = map.next_entry::<String, PlainValue>()? {
            spec.insert_raw(&name, value.into()).map_err(de::Error::custom)?;
        }
        Ok(spec)
    }
}

/// Deserializes from a map such as `{ required = true, minLength = 3 }`,
/// keeping the order of the source document.
impl<'de> Deserialize<'de> for ValidationSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SpecVisitor)
    }
}
