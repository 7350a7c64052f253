//! Numeric checks
//!
//! Values arrive as raw strings from an input control. They are coerced with
//! [`parse_number`]; a value with no numeric prefix fails both `min` and `max`.

/// Parses the longest decimal prefix of a value, `parseFloat`-style.
///
/// Leading whitespace is skipped, then an optional sign followed by either
/// `Infinity` or digits with an optional fraction and exponent. Anything after
/// the prefix is ignored, so `"7 apples"` is 7 and `"0x10"` is 0. `None` when
/// no digit (or `Infinity`) starts the value.
pub fn parse_number(value: &str) -> Option<f64> {
    let text = value.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        let infinity = if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinity);
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

pub fn min_fails(value: &str, min: f64) -> bool {
    parse_number(value).map_or(true, |number| number < min)
}

pub fn max_fails(value: &str, max: f64) -> bool {
    parse_number(value).map_or(true, |number| number > max)
}
