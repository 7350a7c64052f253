//! Integration tests for rule evaluation
//!
//! Table-driven cases for each built-in rule plus property checks.

use proptest::prelude::*;
use regex::Regex;
use rstest::rstest;
use useform_rules::*;

const EMAIL: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[rstest]
#[case("", true)]
#[case("   ", true)]
#[case("holi", false)]
#[case(" a ", false)]
fn test_required(#[case] value: &str, #[case] fails: bool) {
    let errors = evaluate(value, &ValidationSpec::new().required(true));
    assert_eq!(errors["required"], fails);
}

#[rstest]
#[case("a", true)]
#[case("abc", false)]
#[case("abcd", false)]
#[case("", true)]
fn test_min_length(#[case] value: &str, #[case] fails: bool) {
    let errors = evaluate(value, &ValidationSpec::new().min_length(3));
    assert_eq!(errors["minLength"], fails);
}

#[rstest]
#[case("a", false)]
#[case("abcde", false)]
#[case("aabcde", true)]
fn test_max_length(#[case] value: &str, #[case] fails: bool) {
    let errors = evaluate(value, &ValidationSpec::new().max_length(5));
    assert_eq!(errors["maxLength"], fails);
}

#[rstest]
#[case("5", true)]
#[case("7", false)]
#[case("5.1", false)]
#[case("", true)]
#[case("five", true)]
#[case("7 apples", false)]
#[case("5px", true)]
fn test_min(#[case] value: &str, #[case] fails: bool) {
    let errors = evaluate(value, &ValidationSpec::new().min(5.1));
    assert_eq!(errors["min"], fails);
}

#[rstest]
#[case("10.1", true)]
#[case("9.99", false)]
#[case("10", false)]
#[case("", true)]
#[case("9abc", false)]
#[case("0x10", false)]
#[case("11.5kg", true)]
fn test_max(#[case] value: &str, #[case] fails: bool) {
    let errors = evaluate(value, &ValidationSpec::new().max(10.0));
    assert_eq!(errors["max"], fails);
}

#[rstest]
#[case("not an email", true)]
#[case("test@test.com", false)]
#[case("a@b", true)]
fn test_email_regex(#[case] value: &str, #[case] fails: bool) {
    let spec = ValidationSpec::new().regex(Regex::new(EMAIL).unwrap());
    assert_eq!(evaluate(value, &spec)["regex"], fails);
}

#[rstest]
#[case("5abc")]
#[case("5px")]
#[case("7 apples")]
fn test_numeric_prefix_satisfies_both_bounds(#[case] value: &str) {
    let errors = evaluate(value, &ValidationSpec::new().min(3.0).max(10.0));
    assert!(!errors["min"]);
    assert!(!errors["max"]);
}

#[test]
fn test_custom_predicate() {
    let spec = ValidationSpec::new().custom("anything", |v| v == "ok");

    let errors = evaluate(r#"the validator expects to find an "ok" here"#, &spec);
    assert!(errors["anything"]);
    assert!(!evaluate("ok", &spec)["anything"]);
}

#[test]
fn test_required_and_min_length_both_fire_on_empty() {
    let spec = ValidationSpec::new().required(true).min_length(3);
    let errors = evaluate("", &spec);
    assert!(errors["required"]);
    assert!(errors["minLength"]);
}

#[test]
fn test_required_passes_while_min_length_fails() {
    let spec = ValidationSpec::new().required(true).min_length(3);
    let errors = evaluate("ab", &spec);
    assert!(!errors["required"]);
    assert!(errors["minLength"]);
}

#[test]
fn test_ignored_raw_rule_records_nothing() {
    let spec = ValidationSpec::new()
        .with_raw("label", RuleValue::Text("Email".into()))
        .unwrap();
    assert!(spec.is_empty());
    assert!(evaluate("", &spec).is_empty());
}

#[test]
#[should_panic(expected = "predicate exploded")]
fn test_predicate_panic_propagates() {
    let spec = ValidationSpec::new().custom("boom", |_| panic!("predicate exploded"));
    evaluate("anything", &spec);
}

proptest! {
    #[test]
    fn required_fails_iff_blank(value in ".{0,16}") {
        let errors = evaluate(&value, &ValidationSpec::new().required(true));
        prop_assert_eq!(errors["required"], value.trim().is_empty());
    }

    #[test]
    fn length_bounds_match_utf16_length(value in ".{0,16}", bound in 0usize..20) {
        let len = value.encode_utf16().count();
        let spec = ValidationSpec::new().min_length(bound).max_length(bound);
        let errors = evaluate(&value, &spec);
        prop_assert_eq!(errors["minLength"], len < bound);
        prop_assert_eq!(errors["maxLength"], len > bound);
    }

    #[test]
    fn numeric_bounds_follow_parsed_value(number in -1.0e6f64..1.0e6, bound in -1.0e6f64..1.0e6) {
        let value = number.to_string();
        let spec = ValidationSpec::new().min(bound).max(bound);
        let errors = evaluate(&value, &spec);
        prop_assert_eq!(errors["min"], number < bound);
        prop_assert_eq!(errors["max"], number > bound);
    }

    #[test]
    fn evaluation_is_deterministic(value in ".{0,16}") {
        let spec = ValidationSpec::new()
            .required(true)
            .min_length(2)
            .max_length(6)
            .min(0.0)
            .custom("hasDigit", |v| v.chars().any(|c| c.is_ascii_digit()));
        prop_assert_eq!(evaluate(&value, &spec), evaluate(&value, &spec));
    }
}
