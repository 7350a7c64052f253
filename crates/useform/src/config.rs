// File: useform/src/config.rs
// Purpose: Declarative form configuration from useform.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use useform_rules::ValidationSpec;

use crate::field::FieldOptions;
use crate::form::{Form, ValidationMode};

/// Form configuration
///
/// ```toml
/// mode = "on_touched"
///
/// [fields.email]
/// validations = { required = true, regex = '^[^\s@]+@[^\s@]+\.[^\s@]+$' }
///
/// [fields.age]
/// default_value = "18"
/// validations = { min = 18, max = 120 }
/// ```
///
/// Custom predicates cannot be expressed in a config file; add them by
/// re-registering the field with a spec built in code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub mode: ValidationMode,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

/// One field of a [`FormConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub default_value: Option<String>,

    /// Rule names as in code: `required`, `minLength`, `maxLength`, `min`, `max`, `regex`
    #[serde(default)]
    pub validations: Option<ValidationSpec>,
}

impl From<&FieldConfig> for FieldOptions {
    fn from(config: &FieldConfig) -> Self {
        FieldOptions {
            default_value: config.default_value.clone(),
            validations: config.validations.clone(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty file means an empty form
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form config: {:?}", path))
    }

    /// Load configuration from the default path (./useform.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("useform.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(content).context("Invalid form config")?;
        Ok(config)
    }
}

impl Form {
    /// Builds a form with every configured field registered
    pub fn from_config(config: &FormConfig) -> Self {
        let form = Form::with_mode(config.mode);
        for (name, field) in &config.fields {
            form.register(name, field.into());
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIGNUP: &str = r#"
        mode = "on_touched"

        [fields.email]
        validations = { required = true, regex = '^[^\s@]+@[^\s@]+\.[^\s@]+$' }

        [fields.age]
        default_value = "18"
        validations = { min = 18, max = 120.5 }

        [fields.nickname]
    "#;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.mode, ValidationMode::OnChange);
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let config = FormConfig::from_toml_str(SIGNUP).unwrap();
        assert_eq!(config.mode, ValidationMode::OnTouched);
        assert_eq!(
            config.fields.keys().collect::<Vec<_>>(),
            vec!["age", "email", "nickname"]
        );

        let email = config.fields["email"].validations.as_ref().unwrap();
        assert_eq!(email.names().collect::<Vec<_>>(), vec!["required", "regex"]);

        let age = &config.fields["age"];
        assert_eq!(age.default_value.as_deref(), Some("18"));
        assert_eq!(age.validations.as_ref().map(|spec| spec.len()), Some(2));

        assert!(config.fields["nickname"].validations.is_none());
    }

    #[test]
    fn test_empty_content_is_default() {
        let config = FormConfig::from_toml_str("  \n").unwrap();
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let result = FormConfig::from_toml_str(
            r#"
            [fields.code]
            validations = { regex = "(" }
            "#,
        );
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("invalid pattern"), "{message}");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = FormConfig::load("does/not/exist/useform.toml").unwrap();
        assert!(config.fields.is_empty());
    }

    #[test]
    fn test_form_from_config() {
        let config = FormConfig::from_toml_str(SIGNUP).unwrap();
        let form = Form::from_config(&config);

        assert_eq!(form.mode(), ValidationMode::OnTouched);
        assert_eq!(form.value("age").as_deref(), Some("18"));
        assert!(!form.is_valid());

        form.change("email", "test@test.com").unwrap();
        assert!(form.is_valid());
    }
}
