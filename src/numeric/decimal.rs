// ============================================================================
// Decimal Number
// Arbitrary-precision decimal: signed coefficient times a power of ten
// ============================================================================

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, Signed, Zero};
use std::fmt;
use std::str::FromStr;

use super::errors::CoreError;

/// Largest adjusted exponent a finite value may have (`9.99E+999999`).
pub const MAX_EXPONENT: i64 = 999_999;

/// Smallest adjusted exponent a non-zero value may have (`1E-999999`).
pub const MIN_EXPONENT: i64 = -999_999;

/// An exact decimal value of any size or precision.
///
/// The value keeps the exponent it was written with, so `"3.50"` and `"3.5"`
/// compare equal but print differently. `Display` uses the scientific form
/// for very large or very small exponents (`1E+2`, `1.23E-8`);
/// [`DecimalNumber::to_plain_string`] never does.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecimalNumber(BigDecimal);

impl DecimalNumber {
    /// `coefficient × 10^exponent`
    pub fn new(coefficient: impl Into<BigInt>, exponent: i64) -> Self {
        Self(BigDecimal::new(coefficient.into(), exponent.saturating_neg()))
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Parse text already in `[-]int[.frac][e[-]exp]` form.
    pub(super) fn parse_canonical(text: &str) -> Option<Self> {
        BigDecimal::from_str(text).ok().map(Self)
    }

    /// Signed coefficient and exponent.
    pub fn parts(&self) -> (BigInt, i64) {
        let (coefficient, scale) = self.0.as_bigint_and_exponent();
        (coefficient, scale.saturating_neg())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Digits in the coefficient; zero has one.
    pub fn digits(&self) -> u32 {
        digit_count(&self.parts().0)
    }

    /// Exponent of the most significant digit: 2 for `123`, -3 for `0.00123`.
    pub fn adjusted_exponent(&self) -> i128 {
        let (coefficient, exponent) = self.parts();
        adjusted(&coefficient, exponent)
    }

    /// True when the value lies within `MIN_EXPONENT..=MAX_EXPONENT`.
    pub fn is_in_range(&self) -> bool {
        let adjusted = self.adjusted_exponent();
        adjusted >= i128::from(MIN_EXPONENT) && adjusted <= i128::from(MAX_EXPONENT)
    }

    /// Fixed-point text: `1E+2` prints as `100`, `1E-7` as `0.0000001`.
    pub fn to_plain_string(&self) -> String {
        let (coefficient, exponent) = self.parts();
        let digits = coefficient.magnitude().to_string();

        let mut text = String::with_capacity(digits.len() + 2);
        if coefficient.is_negative() {
            text.push('-');
        }
        push_plain(&mut text, &digits, exponent);
        text
    }
}

pub(super) fn digit_count(coefficient: &BigInt) -> u32 {
    coefficient.magnitude().to_string().len() as u32
}

pub(super) fn adjusted(coefficient: &BigInt, exponent: i64) -> i128 {
    i128::from(exponent) + i128::from(digit_count(coefficient)) - 1
}

fn push_plain(text: &mut String, digits: &str, exponent: i64) {
    if exponent >= 0 {
        text.push_str(digits);
        if digits != "0" {
            text.push_str(&"0".repeat(exponent as usize));
        }
        return;
    }

    let point = digits.len() as i64 + exponent;
    if point > 0 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        text.push_str(int_part);
        text.push('.');
        text.push_str(frac_part);
    } else {
        text.push_str("0.");
        text.push_str(&"0".repeat(point.unsigned_abs() as usize));
        text.push_str(digits);
    }
}

impl fmt::Display for DecimalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (coefficient, exponent) = self.parts();
        let digits = coefficient.magnitude().to_string();
        let adjusted = adjusted(&coefficient, exponent);

        let mut text = String::with_capacity(digits.len() + 8);
        if coefficient.is_negative() {
            text.push('-');
        }

        if exponent <= 0 && adjusted >= -6 {
            push_plain(&mut text, &digits, exponent);
        } else {
            let (lead, rest) = digits.split_at(1);
            text.push_str(lead);
            if !rest.is_empty() {
                text.push('.');
                text.push_str(rest);
            }
            text.push_str(&format!("E{adjusted:+}"));
        }

        f.write_str(&text)
    }
}

impl FromStr for DecimalNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::parse_decimal_str(s)
    }
}

impl From<i64> for DecimalNumber {
    fn from(value: i64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl From<u64> for DecimalNumber {
    fn from(value: u64) -> Self {
        Self(BigDecimal::from(value))
    }
}
