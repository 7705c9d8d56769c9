// ============================================================================
// Decimal Parser
// Converts JSON operand values into exact decimals
// ============================================================================

use super::decimal::DecimalNumber;
use super::errors::{CoreError, CoreResult};
use serde_json::{Number, Value};

/// Parse a JSON operand into a [`DecimalNumber`].
///
/// Strings are parsed as decimal text, exactly and at any length. Integers
/// convert exactly. Floats go through their shortest round-trip text, so
/// `1.1` becomes exactly `1.1` rather than the nearest binary value.
///
/// # Errors
/// Returns `InvalidNumber` when the value is null, blank, not numeric,
/// non-finite or has an exponent outside `MIN_EXPONENT..=MAX_EXPONENT`.
pub fn parse_decimal(value: &Value) -> CoreResult<DecimalNumber> {
    match value {
        Value::Null => Err(required()),
        Value::String(text) => parse_text(text),
        Value::Number(number) => parse_number(number),
        other => Err(invalid(&other.to_string())),
    }
}

/// Parse decimal text such as `"3.50"`, `" -2 "` or `"1.5e3"`.
///
/// # Errors
/// Same conditions as [`parse_decimal`].
pub fn parse_decimal_str(text: &str) -> CoreResult<DecimalNumber> {
    parse_text(text)
}

fn parse_number(number: &Number) -> CoreResult<DecimalNumber> {
    if let Some(int) = number.as_i64() {
        return Ok(DecimalNumber::from(int));
    }
    if let Some(uint) = number.as_u64() {
        return Ok(DecimalNumber::from(uint));
    }

    match number.as_f64() {
        Some(float) if float.is_finite() => parse_text(&float_text(float)),
        _ => Err(not_finite(&number.to_string())),
    }
}

/// Shortest text that reads back as `float`: exponent form outside
/// `[1e-4, 1e16)`, otherwise positional with at least one fractional digit.
fn float_text(float: f64) -> String {
    let magnitude = float.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format!("{float:e}")
    } else if float.fract() == 0.0 {
        format!("{float:.1}")
    } else {
        float.to_string()
    }
}

/// Error messages quote `text` untrimmed, as the caller sent it.
fn parse_text(text: &str) -> CoreResult<DecimalNumber> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(required());
    }

    if is_non_finite_literal(trimmed) {
        return Err(not_finite(text));
    }
    let canonical = canonical_literal(trimmed).ok_or_else(|| invalid(text))?;

    // Exponents too long for i64 fail here
    let value = DecimalNumber::parse_canonical(&canonical).ok_or_else(|| out_of_range(text))?;
    if !value.is_in_range() {
        return Err(out_of_range(text));
    }
    Ok(value)
}

/// Validate `[+-]digits[.digits][(e|E)[+-]digits]` and rewrite it as
/// `[-]int[.frac][e[-]exp]` with a non-empty integer part.
fn canonical_literal(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (coefficient, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((coefficient, exponent)) => (coefficient, Some(exponent)),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = coefficient.split_once('.').unwrap_or((coefficient, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return None;
    }

    let mut canonical = String::with_capacity(text.len() + 1);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }

    if let Some(exp) = exponent {
        let (exp_negative, digits) = match exp.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, exp.strip_prefix('+').unwrap_or(exp)),
        };
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
        canonical.push('e');
        if exp_negative {
            canonical.push('-');
        }
        canonical.push_str(digits);
    }

    Some(canonical)
}

/// Spellings of infinity and not-a-number, e.g. `-Infinity`, `NaN`, `sNaN12`.
fn is_non_finite_literal(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    let unsigned = lowered.strip_prefix(['+', '-']).unwrap_or(&lowered);

    if unsigned == "inf" || unsigned == "infinity" {
        return true;
    }

    let payload = unsigned
        .strip_prefix("snan")
        .or_else(|| unsigned.strip_prefix("nan"));
    matches!(payload, Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()))
}

fn required() -> CoreError {
    CoreError::invalid_number("Numeric value is required")
}

fn invalid(original: &str) -> CoreError {
    CoreError::invalid_number(format!("Invalid numeric value: '{original}'"))
}

fn not_finite(original: &str) -> CoreError {
    CoreError::invalid_number(format!("Numeric value must be finite: '{original}'"))
}

fn out_of_range(original: &str) -> CoreError {
    CoreError::invalid_number(format!("Numeric value out of range: '{original}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn dec(s: &str) -> DecimalNumber {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_from_string() {
        let d = parse_decimal(&json!("3.50")).unwrap();
        assert_eq!(d, dec("3.5"));
        assert_eq!(d.to_string(), "3.50");

        assert_eq!(parse_decimal(&json!("  -2 ")).unwrap(), dec("-2"));
        assert_eq!(parse_decimal(&json!("+.5")).unwrap(), dec("0.5"));
        assert_eq!(parse_decimal(&json!("7.")).unwrap(), dec("7"));
    }

    #[test]
    fn test_canonical_literal() {
        assert_eq!(canonical_literal("+.5").as_deref(), Some("0.5"));
        assert_eq!(canonical_literal("-7.").as_deref(), Some("-7"));
        assert_eq!(canonical_literal("1.5E+3").as_deref(), Some("1.5e3"));
        assert_eq!(canonical_literal("2e-4").as_deref(), Some("2e-4"));
        assert_eq!(canonical_literal("+-1"), None);
        assert_eq!(canonical_literal("1e+"), None);
        assert_eq!(canonical_literal("e5"), None);
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_decimal_str("1e5").unwrap(), dec("100000"));
        assert_eq!(parse_decimal_str("2.5E-3").unwrap(), dec("0.0025"));

        let hundred = parse_decimal_str("1E+2").unwrap();
        assert_eq!(hundred, dec("100"));
        assert_eq!(hundred.to_string(), "1E+2");
    }

    #[test]
    fn test_parse_from_integer() {
        assert_eq!(parse_decimal(&json!(2)).unwrap(), dec("2"));
        assert_eq!(parse_decimal(&json!(-40)).unwrap(), dec("-40"));
        assert_eq!(
            parse_decimal(&json!(u64::MAX)).unwrap().to_string(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn test_parse_from_float_uses_shortest_text() {
        assert_eq!(parse_decimal(&json!(1.5)).unwrap(), dec("1.5"));
        // 1.1 is not exactly representable in binary
        assert_eq!(parse_decimal(&json!(1.1)).unwrap().to_string(), "1.1");
        assert_eq!(parse_decimal(&json!(0.1)).unwrap().to_string(), "0.1");
        assert_eq!(parse_decimal(&json!(100.0)).unwrap().to_string(), "100.0");
        assert_eq!(parse_decimal(&json!(1e20)).unwrap().to_string(), "1E+20");
        assert_eq!(parse_decimal(&json!(2.5e-7)).unwrap().to_string(), "2.5E-7");
    }

    #[test]
    fn test_missing_values() {
        for value in [json!(null), json!(""), json!("   ")] {
            let err = parse_decimal(&value).unwrap_err();
            assert_eq!(err, CoreError::invalid_number("Numeric value is required"));
        }
    }

    #[test]
    fn test_invalid_values() {
        let err = parse_decimal(&json!("abc")).unwrap_err();
        assert_eq!(err.message(), "Invalid numeric value: 'abc'");

        for value in [
            json!(true),
            json!([1]),
            json!({"a": 1}),
            json!("1.2.3"),
            json!("1e"),
            json!("--1"),
            json!("."),
            json!("0x10"),
            json!("1 000"),
        ] {
            assert!(
                matches!(parse_decimal(&value), Err(CoreError::InvalidNumber { .. })),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        for text in ["inf", "-Infinity", "+INF", "NaN", "nan", "sNaN", "NaN123"] {
            let err = parse_decimal_str(text).unwrap_err();
            assert_eq!(
                err.message(),
                format!("Numeric value must be finite: '{text}'")
            );
        }
    }

    #[test]
    fn test_large_and_small_magnitudes_parse_exactly() {
        assert_eq!(parse_decimal_str("1e40").unwrap().to_string(), "1E+40");
        assert_eq!(parse_decimal_str("1e-30").unwrap().to_string(), "1E-30");

        let long = "99999999999999999999999999999999.000000000000000000000001";
        assert_eq!(parse_decimal_str(long).unwrap().to_plain_string(), long);
    }

    #[test]
    fn test_exponent_out_of_range_rejected() {
        let err = parse_decimal_str("1e1000000").unwrap_err();
        assert_eq!(err.message(), "Numeric value out of range: '1e1000000'");

        for text in ["1e-1000000", "1e99999999999999999999", "12.5e999999"] {
            assert!(
                matches!(parse_decimal_str(text), Err(CoreError::InvalidNumber { .. })),
                "{text} should be rejected"
            );
        }
        assert!(parse_decimal_str("9.5e999999").is_ok());
    }

    proptest! {
        #[test]
        fn prop_canonical_text_round_trips(mantissa in any::<i64>(), exponent in -60i64..=60) {
            prop_assume!(mantissa != 0);
            let value = DecimalNumber::new(mantissa, exponent);
            let parsed = parse_decimal_str(&value.to_string()).unwrap();
            prop_assert_eq!(&parsed, &value);
            prop_assert_eq!(parsed.to_string(), value.to_string());

            let plain = parse_decimal_str(&value.to_plain_string()).unwrap();
            prop_assert_eq!(plain, value);
        }

        #[test]
        fn prop_finite_floats_parse(float in proptest::num::f64::NORMAL) {
            let parsed = parse_decimal(&json!(float)).unwrap();
            prop_assert_eq!(parsed.to_plain_string().parse::<f64>().unwrap(), float);
        }
    }
}
