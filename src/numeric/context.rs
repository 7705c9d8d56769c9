// ============================================================================
// Decimal Context
// Precision and rounding policy applied to every arithmetic result
// ============================================================================

use super::decimal::{adjusted, digit_count, DecimalNumber, MAX_EXPONENT, MIN_EXPONENT};
use super::errors::ContextError;
use bigdecimal::num_bigint::BigInt;
use bigdecimal::{One, Signed, Zero};
use std::fmt;
use std::str::FromStr;

/// Default number of significant digits.
pub const DEFAULT_PRECISION: u32 = 28;

/// Rounding policy applied when a result has more significant digits than
/// the context allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Towards +infinity
    Ceiling,
    /// Towards zero (truncate)
    Down,
    /// Towards -infinity
    Floor,
    /// Nearest, ties towards zero
    HalfDown,
    /// Nearest, ties to even (banker's rounding)
    #[default]
    HalfEven,
    /// Nearest, ties away from zero
    HalfUp,
    /// Away from zero
    Up,
    /// Towards zero, unless the last kept digit would be 0 or 5
    ZeroFiveUp,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Ceiling,
        RoundingMode::Down,
        RoundingMode::Floor,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfUp,
        RoundingMode::Up,
        RoundingMode::ZeroFiveUp,
    ];

    /// Conventional configuration name, e.g. `ROUND_HALF_EVEN`.
    pub fn name(self) -> &'static str {
        match self {
            RoundingMode::Ceiling => "ROUND_CEILING",
            RoundingMode::Down => "ROUND_DOWN",
            RoundingMode::Floor => "ROUND_FLOOR",
            RoundingMode::HalfDown => "ROUND_HALF_DOWN",
            RoundingMode::HalfEven => "ROUND_HALF_EVEN",
            RoundingMode::HalfUp => "ROUND_HALF_UP",
            RoundingMode::Up => "ROUND_UP",
            RoundingMode::ZeroFiveUp => "ROUND_05UP",
        }
    }

    /// Whether the truncated coefficient must be bumped by one unit.
    ///
    /// Digits are ASCII. `rest_nonzero` covers everything after the first
    /// dropped digit.
    fn rounds_away(self, negative: bool, last_kept: u8, first_dropped: u8, rest_nonzero: bool) -> bool {
        let inexact = first_dropped != b'0' || rest_nonzero;
        let above_half = first_dropped > b'5' || (first_dropped == b'5' && rest_nonzero);
        let at_half = first_dropped == b'5' && !rest_nonzero;

        match self {
            RoundingMode::Down => false,
            RoundingMode::Up => inexact,
            RoundingMode::Ceiling => inexact && !negative,
            RoundingMode::Floor => inexact && negative,
            RoundingMode::HalfUp => above_half || at_half,
            RoundingMode::HalfDown => above_half,
            RoundingMode::HalfEven => above_half || (at_half && (last_kept - b'0') % 2 == 1),
            RoundingMode::ZeroFiveUp => inexact && matches!(last_kept, b'0' | b'5'),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = ContextError;

    /// Accepts `ROUND_HALF_EVEN`, `HALF_EVEN`, `half-even` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        let key = normalized.strip_prefix("ROUND_").unwrap_or(&normalized);

        match key {
            "CEILING" => Ok(RoundingMode::Ceiling),
            "DOWN" => Ok(RoundingMode::Down),
            "FLOOR" => Ok(RoundingMode::Floor),
            "HALF_DOWN" => Ok(RoundingMode::HalfDown),
            "HALF_EVEN" => Ok(RoundingMode::HalfEven),
            "HALF_UP" => Ok(RoundingMode::HalfUp),
            "UP" => Ok(RoundingMode::Up),
            "05UP" => Ok(RoundingMode::ZeroFiveUp),
            _ => Err(ContextError::UnsupportedRounding(s.trim().to_string())),
        }
    }
}

/// Precision and rounding applied uniformly to every computation.
///
/// Every operation computes enough digits to know the correctly rounded
/// answer and rounds exactly once. Built once at startup and handed to the
/// calculator by value; it is never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    precision: u32,
    rounding: RoundingMode,
}

impl DecimalContext {
    /// Create a context.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` when `precision` is zero.
    pub fn new(precision: u32, rounding: RoundingMode) -> Result<Self, ContextError> {
        if precision == 0 {
            return Err(ContextError::InvalidPrecision { value: precision });
        }
        Ok(Self {
            precision,
            rounding,
        })
    }

    /// Significant-digit count
    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Round `value` to the context's precision.
    ///
    /// Values that already fit are returned unchanged, trailing zeros
    /// included. Returns `None` when the rounded value is too large to
    /// represent.
    pub fn round(&self, value: &DecimalNumber) -> Option<DecimalNumber> {
        let (coefficient, exponent) = value.parts();
        self.finish(coefficient, exponent)
    }

    /// `a + b`, rounded once. `None` on overflow.
    pub fn add(&self, a: &DecimalNumber, b: &DecimalNumber) -> Option<DecimalNumber> {
        let (ca, ea) = a.parts();
        let (cb, eb) = b.parts();
        let (coefficient, exponent) = self.sum(ca, ea, cb, eb);
        self.finish(coefficient, exponent)
    }

    /// `a - b`, rounded once. `None` on overflow.
    pub fn subtract(&self, a: &DecimalNumber, b: &DecimalNumber) -> Option<DecimalNumber> {
        let (ca, ea) = a.parts();
        let (cb, eb) = b.parts();
        let (coefficient, exponent) = self.sum(ca, ea, -cb, eb);
        self.finish(coefficient, exponent)
    }

    /// `a × b`, rounded once. `None` on overflow.
    pub fn multiply(&self, a: &DecimalNumber, b: &DecimalNumber) -> Option<DecimalNumber> {
        let (ca, ea) = a.parts();
        let (cb, eb) = b.parts();
        self.finish(ca * cb, ea.checked_add(eb)?)
    }

    /// `a ÷ b`, rounded once. `None` when `b` is zero or on overflow.
    ///
    /// Exact quotients take the exponent closest to `exp(a) - exp(b)`, so
    /// `6 ÷ 3 = 2` and `1.00 ÷ 0.5 = 2.0`.
    pub fn divide(&self, a: &DecimalNumber, b: &DecimalNumber) -> Option<DecimalNumber> {
        let (ca, ea) = a.parts();
        let (cb, eb) = b.parts();
        if cb.is_zero() {
            return None;
        }

        let ideal = ea.checked_sub(eb)?;
        if ca.is_zero() {
            return self.finish(ca, ideal);
        }

        let negative = ca.is_negative() != cb.is_negative();
        let (dividend, divisor) = (ca.abs(), cb.abs());

        // At least precision + 1 quotient digits, so the first dropped digit is real
        let wanted = self.precision + 1 + digit_count(&divisor);
        let shift = wanted.saturating_sub(digit_count(&dividend));

        let scaled = dividend * pow10(shift);
        let mut quotient = &scaled / &divisor;
        let remainder = &scaled % &divisor;
        let mut exponent = ideal - i64::from(shift);

        let ten = BigInt::from(10);
        if remainder.is_zero() {
            while exponent < ideal && (&quotient % &ten).is_zero() {
                quotient = &quotient / &ten;
                exponent += 1;
            }
        } else {
            // Trailing 1 stands in for the non-zero remainder
            quotient = quotient * &ten + BigInt::one();
            exponent -= 1;
        }

        if negative {
            quotient = -quotient;
        }
        self.finish(quotient, exponent)
    }

    /// Exact sum, except that an addend lying wholly below every digit that
    /// can influence rounding is replaced by a one-digit stand-in of the same
    /// sign. The rounded result is identical and the work stays proportional
    /// to the precision rather than the exponent gap.
    fn sum(&self, ca: BigInt, ea: i64, cb: BigInt, eb: i64) -> (BigInt, i64) {
        // `a` gets the larger exponent
        let ((ca, ea), (cb, eb)) = if ea >= eb {
            ((ca, ea), (cb, eb))
        } else {
            ((cb, eb), (ca, ea))
        };
        let precision = i64::from(self.precision);

        if ca.is_zero() {
            return (cb, eb);
        }
        if cb.is_zero() {
            // Pad `a` toward the zero's exponent, no further than rounding keeps
            let room = (precision - i64::from(digit_count(&ca))).max(0);
            let pad = (ea - eb).min(room);
            return (ca * pow10(pad as u32), ea - pad);
        }

        let adjusted_a = ea + i64::from(digit_count(&ca)) - 1;
        let adjusted_b = eb + i64::from(digit_count(&cb)) - 1;
        let threshold = ea.min(adjusted_a - precision - 1) - 1;

        let (cb, eb) = if adjusted_b < threshold {
            let unit = if cb.is_negative() { -BigInt::one() } else { BigInt::one() };
            (unit, threshold - 1)
        } else {
            (cb, eb)
        };

        (ca * pow10((ea - eb) as u32) + cb, eb)
    }

    /// Round to precision, then enforce the exponent range. Non-zero results
    /// below the range flush to zero.
    fn finish(&self, coefficient: BigInt, exponent: i64) -> Option<DecimalNumber> {
        let (coefficient, exponent) = self.round_parts(coefficient, exponent);

        if coefficient.is_zero() {
            return Some(DecimalNumber::new(
                coefficient,
                exponent.clamp(MIN_EXPONENT, MAX_EXPONENT),
            ));
        }

        let adjusted = adjusted(&coefficient, exponent);
        if adjusted > i128::from(MAX_EXPONENT) {
            return None;
        }
        if adjusted < i128::from(MIN_EXPONENT) {
            return Some(DecimalNumber::zero());
        }
        Some(DecimalNumber::new(coefficient, exponent))
    }

    fn round_parts(&self, coefficient: BigInt, exponent: i64) -> (BigInt, i64) {
        let digits = coefficient.magnitude().to_string();
        let precision = self.precision as usize;
        if digits.len() <= precision {
            return (coefficient, exponent);
        }

        let (kept, dropped) = digits.split_at(precision);
        let dropped = dropped.as_bytes();
        let last_kept = kept.as_bytes()[precision - 1];
        let rest_nonzero = dropped[1..].iter().any(|&digit| digit != b'0');
        let negative = coefficient.is_negative();

        let drop_count = dropped.len() as u32;
        let mut rounded = coefficient.abs() / pow10(drop_count);
        let mut exponent = exponent + i64::from(drop_count);

        if self
            .rounding
            .rounds_away(negative, last_kept, dropped[0], rest_nonzero)
        {
            rounded += BigInt::one();
            // 999.. carried into an extra digit
            if rounded == pow10(self.precision) {
                rounded = rounded / BigInt::from(10);
                exponent += 1;
            }
        }

        if negative {
            rounded = -rounded;
        }
        (rounded, exponent)
    }
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10).pow(exponent)
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::HalfEven,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn num(s: &str) -> DecimalNumber {
        s.parse().unwrap()
    }

    fn ctx(precision: u32, rounding: RoundingMode) -> DecimalContext {
        DecimalContext::new(precision, rounding).unwrap()
    }

    #[test]
    fn test_default_context() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.precision(), 28);
        assert_eq!(ctx.rounding(), RoundingMode::HalfEven);
    }

    #[test]
    fn test_precision_bounds() {
        assert!(DecimalContext::new(1, RoundingMode::HalfEven).is_ok());
        assert!(DecimalContext::new(28, RoundingMode::HalfEven).is_ok());
        assert!(DecimalContext::new(100, RoundingMode::HalfEven).is_ok());
        assert_eq!(
            DecimalContext::new(0, RoundingMode::HalfEven),
            Err(ContextError::InvalidPrecision { value: 0 })
        );
    }

    #[test]
    fn test_rounding_mode_names() {
        assert_eq!(
            "ROUND_HALF_EVEN".parse::<RoundingMode>(),
            Ok(RoundingMode::HalfEven)
        );
        assert_eq!(
            "round_half_up".parse::<RoundingMode>(),
            Ok(RoundingMode::HalfUp)
        );
        assert_eq!(
            "half-down".parse::<RoundingMode>(),
            Ok(RoundingMode::HalfDown)
        );
        assert_eq!(
            " CEILING ".parse::<RoundingMode>(),
            Ok(RoundingMode::Ceiling)
        );
        assert_eq!(
            "ROUND_05UP".parse::<RoundingMode>(),
            Ok(RoundingMode::ZeroFiveUp)
        );
        assert_eq!(
            "sideways".parse::<RoundingMode>(),
            Err(ContextError::UnsupportedRounding("sideways".to_string()))
        );

        for mode in RoundingMode::ALL {
            assert_eq!(mode.name().parse::<RoundingMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_round_keeps_values_within_precision() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.round(&num("3.0")).unwrap().to_string(), "3.0");
        assert_eq!(ctx.round(&num("0.00")).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_round_trims_excess_digits() {
        let ctx = ctx(5, RoundingMode::HalfEven);
        assert_eq!(ctx.round(&num("0.333333333")).unwrap().to_string(), "0.33333");
        assert_eq!(ctx.round(&num("3.00000000")).unwrap().to_string(), "3.0000");
        assert_eq!(ctx.round(&num("99999.5")).unwrap().to_string(), "1.0000E+5");
        assert_eq!(ctx.round(&num("123456")).unwrap().to_plain_string(), "123460");
    }

    #[test]
    fn test_round_midpoint_by_mode() {
        let eighth = num("0.125");
        let round = |mode| ctx(2, mode).round(&eighth).unwrap().to_string();

        assert_eq!(round(RoundingMode::HalfEven), "0.12");
        assert_eq!(round(RoundingMode::HalfUp), "0.13");
        assert_eq!(round(RoundingMode::HalfDown), "0.12");
        assert_eq!(round(RoundingMode::Up), "0.13");
        assert_eq!(round(RoundingMode::Down), "0.12");
        assert_eq!(round(RoundingMode::Ceiling), "0.13");
        assert_eq!(round(RoundingMode::Floor), "0.12");
        assert_eq!(round(RoundingMode::ZeroFiveUp), "0.12");
    }

    #[test]
    fn test_round_directed_modes_on_negative() {
        let value = num("-0.125");
        assert_eq!(ctx(2, RoundingMode::Ceiling).round(&value).unwrap().to_string(), "-0.12");
        assert_eq!(ctx(2, RoundingMode::Floor).round(&value).unwrap().to_string(), "-0.13");
    }

    #[test]
    fn test_zero_five_up() {
        let ctx = ctx(2, RoundingMode::ZeroFiveUp);
        // Kept digit 0 or 5 moves away from zero when anything was dropped
        assert_eq!(ctx.round(&num("1.01")).unwrap().to_string(), "1.1");
        assert_eq!(ctx.round(&num("2.51")).unwrap().to_string(), "2.6");
        assert_eq!(ctx.round(&num("-2.01")).unwrap().to_string(), "-2.1");
        // Anything else truncates
        assert_eq!(ctx.round(&num("1.29")).unwrap().to_string(), "1.2");
        // Exact values stay put
        assert_eq!(ctx.round(&num("1.00")).unwrap().to_string(), "1.0");
    }

    #[test]
    fn test_division_rounds_once_at_default_precision() {
        let (one, two, three) = (num("1"), num("2"), num("3"));
        let divide = |mode, a: &DecimalNumber, b: &DecimalNumber| {
            ctx(28, mode).divide(a, b).unwrap().to_string()
        };

        assert_eq!(divide(RoundingMode::HalfEven, &two, &three), "0.6666666666666666666666666667");
        assert_eq!(divide(RoundingMode::Down, &two, &three), "0.6666666666666666666666666666");
        assert_eq!(divide(RoundingMode::ZeroFiveUp, &two, &three), "0.6666666666666666666666666666");
        assert_eq!(divide(RoundingMode::Up, &one, &three), "0.3333333333333333333333333334");
        assert_eq!(divide(RoundingMode::Ceiling, &one, &three), "0.3333333333333333333333333334");
        assert_eq!(divide(RoundingMode::Floor, &one, &three), "0.3333333333333333333333333333");
        assert_eq!(divide(RoundingMode::Floor, &num("-1"), &three), "-0.3333333333333333333333333334");
        assert_eq!(divide(RoundingMode::Ceiling, &num("-1"), &three), "-0.3333333333333333333333333333");
    }

    #[test]
    fn test_exact_division_uses_ideal_exponent() {
        let ctx = DecimalContext::default();
        let divide = |a: &str, b: &str| ctx.divide(&num(a), &num(b)).unwrap().to_string();

        assert_eq!(divide("6", "3"), "2");
        assert_eq!(divide("1.00", "0.5"), "2.0");
        assert_eq!(divide("10", "0.5"), "2E+1");
        assert_eq!(divide("100", "4"), "25");
        assert_eq!(divide("1", "8"), "0.125");
        assert_eq!(divide("10", "4"), "2.5");
        assert_eq!(divide("0.00", "7"), "0.00");
        assert!(ctx.divide(&num("1"), &num("0")).is_none());
    }

    #[test]
    fn test_magnitudes_beyond_machine_decimals() {
        let ctx = DecimalContext::default();
        let product = ctx.multiply(&num("1e20"), &num("1e20")).unwrap();
        assert_eq!(product.to_string(), "1E+40");

        let sum = ctx.add(&num("1e-30"), &num("2e-30")).unwrap();
        assert_eq!(sum.to_string(), "3E-30");

        let quotient = ctx.divide(&num("1"), &num("1e-30")).unwrap();
        assert_eq!(quotient.to_string(), "1E+30");
    }

    #[test]
    fn test_add_with_distant_exponents() {
        let ctx = ctx(5, RoundingMode::HalfEven);
        let tiny = num("1e-900000");

        assert_eq!(ctx.add(&num("1"), &tiny).unwrap().to_string(), "1.0000");
        assert_eq!(ctx.subtract(&num("1"), &tiny).unwrap().to_string(), "1.0000");
        assert_eq!(
            ctx.add(&num("1.00005"), &tiny).unwrap().to_string(),
            "1.0001"
        );

        let up = DecimalContext::new(5, RoundingMode::Up).unwrap();
        assert_eq!(up.add(&num("1"), &tiny).unwrap().to_string(), "1.0001");

        let down = DecimalContext::new(5, RoundingMode::Down).unwrap();
        assert_eq!(down.subtract(&num("1"), &tiny).unwrap().to_string(), "0.99999");
        assert_eq!(down.add(&num("-1"), &tiny).unwrap().to_string(), "-0.99999");
    }

    #[test]
    fn test_add_zero_pads_to_the_smaller_exponent() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.add(&num("1"), &num("0.00")).unwrap().to_string(), "1.00");
        assert_eq!(ctx.add(&num("1e-7"), &num("0")).unwrap().to_string(), "1E-7");
        assert_eq!(
            ctx.add(&num("1"), &DecimalNumber::new(0, -40)).unwrap().to_string(),
            format!("1.{}", "0".repeat(27))
        );
    }

    #[test]
    fn test_overflow_and_underflow() {
        let ctx = DecimalContext::default();
        assert!(ctx.multiply(&num("1e999999"), &num("10")).is_none());
        assert!(ctx.add(&num("9.9e999999"), &num("9.9e999999")).is_none());

        let flushed = ctx.multiply(&num("1e-999999"), &num("1e-10")).unwrap();
        assert!(flushed.is_zero());
    }

    fn wide_decimal() -> impl Strategy<Value = DecimalNumber> {
        (any::<i64>(), -400i64..=400).prop_map(|(coefficient, exponent)| {
            DecimalNumber::new(coefficient, exponent)
        })
    }

    proptest! {
        #[test]
        fn prop_results_fit_precision(
            a in wide_decimal(),
            b in wide_decimal(),
            precision in 1u32..=40,
        ) {
            let ctx = DecimalContext::new(precision, RoundingMode::HalfEven).unwrap();
            for result in [ctx.add(&a, &b), ctx.subtract(&a, &b), ctx.multiply(&a, &b)] {
                let result = result.unwrap();
                prop_assert!(result.digits() <= precision);
            }
        }

        #[test]
        fn prop_directed_modes_bracket_the_quotient(
            a in wide_decimal(),
            b in wide_decimal().prop_filter("non-zero", |b| !b.is_zero()),
        ) {
            let down = DecimalContext::new(28, RoundingMode::Floor).unwrap().divide(&a, &b).unwrap();
            let up = DecimalContext::new(28, RoundingMode::Ceiling).unwrap().divide(&a, &b).unwrap();
            let even = DecimalContext::default().divide(&a, &b).unwrap();
            prop_assert!(down <= even && even <= up);
        }
    }
}
