use thiserror::Error;

const TRUE_WORDS: [&str; 5] = ["true", "ok", "1", "yes", "on"];
const FALSE_WORDS: [&str; 4] = ["false", "no", "0", "off"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{value}' cannot convert to {target}.")]
pub(crate) struct ConvertError {
    value: String,
    target: &'static str,
}

impl ConvertError {
    fn new(value: &str, target: &'static str) -> Self {
        Self {
            value: value.to_string(),
            target,
        }
    }
}

pub(crate) fn is_true(value: &str) -> bool {
    TRUE_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(value))
}

pub(crate) fn parse_bool(value: &str) -> Result<bool, ConvertError> {
    if is_true(value) {
        Ok(true)
    } else if FALSE_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(value))
    {
        Ok(false)
    } else {
        Err(ConvertError::new(value, "bool"))
    }
}

/// Parse a signed integer, detecting the base from its prefix:
/// `0x` (hex), `0o` or a bare leading `0` (octal), `0b` (binary), otherwise decimal.
/// Underscores may separate digits.
pub(crate) fn parse_int(value: &str) -> Result<i64, ConvertError> {
    let error = || ConvertError::new(value, "i64");
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let magnitude = parse_magnitude(digits).ok_or_else(error)?;

    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Ok(i64::MIN)
        } else {
            i64::try_from(magnitude).map(|m| -m).map_err(|_| error())
        }
    } else {
        i64::try_from(magnitude).map_err(|_| error())
    }
}

/// Parse an unsigned integer, detecting the base as per [`parse_int`].
/// No sign is permitted.
pub(crate) fn parse_uint(value: &str) -> Result<u64, ConvertError> {
    parse_magnitude(value).ok_or_else(|| ConvertError::new(value, "u64"))
}

fn parse_magnitude(text: &str) -> Option<u64> {
    let (radix, body, prefixed) = split_radix(text);

    if !underscores_separate(body, prefixed) {
        return None;
    }

    let digits: String = body.chars().filter(|c| *c != '_').collect();

    // from_str_radix tolerates a sign, so check the digits ourselves.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    u64::from_str_radix(&digits, radix).ok()
}

fn split_radix(text: &str) -> (u32, &str, bool) {
    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        for prefix in prefixes {
            if let Some(body) = text.strip_prefix(prefix) {
                return (radix, body, true);
            }
        }
    }

    match text.strip_prefix('0') {
        Some(body) if !body.is_empty() => (8, body, true),
        _ => (10, text, false),
    }
}

// Each '_' must follow a digit (or the base prefix) and precede a digit.
fn underscores_separate(body: &str, prefixed: bool) -> bool {
    let mut after_digit = prefixed;
    let mut trailing_underscore = false;

    for c in body.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }

            after_digit = false;
            trailing_underscore = true;
        } else {
            after_digit = true;
            trailing_underscore = false;
        }
    }

    !trailing_underscore
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("ok", true)]
    #[case("Ok", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("YeS", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("y", false)]
    #[case("2", false)]
    #[case("", false)]
    #[case(" true", false)]
    fn true_words(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_true(value), expected);
    }

    #[rstest]
    #[case("true", Ok(true))]
    #[case("ON", Ok(true))]
    #[case("false", Ok(false))]
    #[case("No", Ok(false))]
    #[case("0", Ok(false))]
    #[case("off", Ok(false))]
    #[case("maybe", Err(ConvertError::new("maybe", "bool")))]
    #[case("", Err(ConvertError::new("", "bool")))]
    fn bools(#[case] value: &str, #[case] expected: Result<bool, ConvertError>) {
        assert_eq!(parse_bool(value), expected);
    }

    #[rstest]
    #[case("42", 42)]
    #[case("+42", 42)]
    #[case("-42", -42)]
    #[case("0", 0)]
    #[case("-0", 0)]
    #[case("00", 0)]
    #[case("017", 15)]
    #[case("0o17", 15)]
    #[case("0O17", 15)]
    #[case("0x1F", 31)]
    #[case("0X1f", 31)]
    #[case("-0x1F", -31)]
    #[case("0b101", 5)]
    #[case("1_000", 1000)]
    #[case("0x_1F", 31)]
    #[case("0_17", 15)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("-9223372036854775808", i64::MIN)]
    fn ints(#[case] value: &str, #[case] expected: i64) {
        assert_eq!(parse_int(value), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("+")]
    #[case("abc")]
    #[case("08")]
    #[case("0x")]
    #[case("0xG")]
    #[case("0b2")]
    #[case("1.5")]
    #[case(" 1")]
    #[case("1 ")]
    #[case("--1")]
    #[case("+-1")]
    #[case("_1")]
    #[case("1_")]
    #[case("1__0")]
    #[case("9223372036854775808")]
    #[case("-9223372036854775809")]
    fn ints_malformed(#[case] value: &str) {
        assert_eq!(parse_int(value), Err(ConvertError::new(value, "i64")));
    }

    #[rstest]
    #[case("42", 42)]
    #[case("017", 15)]
    #[case("0x1F", 31)]
    #[case("18446744073709551615", u64::MAX)]
    fn uints(#[case] value: &str, #[case] expected: u64) {
        assert_eq!(parse_uint(value), Ok(expected));
    }

    #[rstest]
    #[case("-1")]
    #[case("+1")]
    #[case("18446744073709551616")]
    #[case("0x")]
    fn uints_malformed(#[case] value: &str) {
        assert_eq!(parse_uint(value), Err(ConvertError::new(value, "u64")));
    }

    #[test]
    fn convert_error_display() {
        assert_eq!(
            ConvertError::new("abc", "i64").to_string(),
            "'abc' cannot convert to i64."
        );
    }
}
