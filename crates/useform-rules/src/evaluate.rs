//! Rule evaluation

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::spec::ValidationSpec;

/// Names of the rules that failed for one value, in spec order.
///
/// Indexing by a rule name yields `true` exactly when that rule failed;
/// passing and unknown rules read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    failed: Vec<String>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: &str) {
        if !self.contains(name) {
            self.failed.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.failed.iter().any(|failed| failed == name)
    }

    /// Same as indexing: `true` when the named rule failed
    pub fn get(&self, name: &str) -> bool {
        self.contains(name)
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.failed.iter().map(String::as_str)
    }

    /// `(name, true)` per failing rule
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.failed().map(|name| (name, true))
    }

    pub fn len(&self) -> usize {
        self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Index<&str> for Errors {
    type Output = bool;

    fn index(&self, name: &str) -> &bool {
        if self.contains(name) {
            &true
        } else {
            &false
        }
    }
}

/// Serializes as `{ "<rule>": true, ... }`
impl Serialize for Errors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.failed.len()))?;
        for name in &self.failed {
            map.serialize_entry(name, &true)?;
        }
        map.end()
    }
}

/// Runs every rule of `spec` against `value`.
///
/// Rules are independent: all of them run against the same value, so every
/// failing rule is reported at once. Panics from custom predicates propagate.
pub fn evaluate(value: &str, spec: &ValidationSpec) -> Errors {
    let mut errors = Errors::new();
    for (name, rule) in spec.iter() {
        if rule.fails(value) {
            tracing::trace!(rule = name, "rule failed");
            errors.insert(name);
        }
    }
    errors
}

/// [`evaluate`] for fields registered without validations
pub fn evaluate_opt(value: &str, spec: Option<&ValidationSpec>) -> Errors {
    spec.map(|spec| evaluate(value, spec)).unwrap_or_default()
}
