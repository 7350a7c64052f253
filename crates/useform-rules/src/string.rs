//! String checks
//!
//! Every function here answers "does this rule fail for `value`?".

use regex::Regex;

/// Fails when the value is empty after trimming whitespace
pub fn required_fails(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length in UTF-16 code units, the unit browser inputs count in.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count as 2.
pub fn char_length(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn min_length_fails(value: &str, min: usize) -> bool {
    char_length(value) < min
}

pub fn max_length_fails(value: &str, max: usize) -> bool {
    char_length(value) > max
}

/// Fails when the pattern matches nowhere in the value.
///
/// Search semantics: anchor the pattern with `^...$` to require a
/// whole-value match.
pub fn regex_fails(value: &str, pattern: &Regex) -> bool {
    !pattern.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required_fails(""));
        assert!(required_fails("   "));
        assert!(required_fails("\t\n"));
        assert!(!required_fails("a"));
        assert!(!required_fails("  a  "));
    }

    #[test]
    fn test_length_checks() {
        assert!(min_length_fails("ab", 3));
        assert!(!min_length_fails("abc", 3));
        assert!(min_length_fails("", 1));
        assert!(!min_length_fails("", 0));

        assert!(!max_length_fails("abcde", 5));
        assert!(max_length_fails("abcdef", 5));
    }

    #[test]
    fn test_length_counts_utf16_units_not_bytes() {
        assert_eq!(char_length("héllo"), 5);
        assert!(!max_length_fails("ñññ", 3));
    }

    #[test]
    fn test_astral_characters_count_twice() {
        assert_eq!(char_length("😀"), 2);
        assert!(max_length_fails("😀", 1));
        assert!(!min_length_fails("😀", 2));
    }

    #[test]
    fn test_regex_search_semantics() {
        let digit = Regex::new(r"\d").unwrap();
        assert!(!regex_fails("abc1", &digit));
        assert!(regex_fails("abc", &digit));

        let anchored = Regex::new(r"^\d+$").unwrap();
        assert!(regex_fails("abc1", &anchored));
        assert!(!regex_fails("123", &anchored));
    }
}
