//! Scale and rounding helpers shared by every currency.
//!
//! All conversions between smallest units and decimals go through here so
//! that exactly one rounding mode is ever applied.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::error::AmountError;

/// Rounding mode for every decimal boundary: round half away from zero.
///
/// `2.5 -> 3`, `-2.5 -> -3`, `2.4 -> 2`.
pub const ROUNDING_MODE: RoundingMode = RoundingMode::HalfUp;

/// Largest number of zeros a shift may append to a decimal's digits.
///
/// Bounds the work and memory spent on inputs such as `1e300000`.
pub const MAX_SHIFT_DIGITS: i64 = 1024;

/// Returns `round(value * 10^shift)` as an integer.
///
/// `shift` may be negative, in which case the value is divided instead.
/// The shift is applied to the decimal exponent directly, so no
/// intermediate precision is lost before the single rounding step.
///
/// Fails with [`AmountError::ExponentOutOfRange`] when the shifted exponent
/// overflows `i64` or would append more than [`MAX_SHIFT_DIGITS`] zeros.
pub fn shift_to_units(value: &BigDecimal, shift: i64) -> Result<BigInt, AmountError> {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    let scale = scale.checked_sub(shift).ok_or(AmountError::ExponentOutOfRange(shift))?;

    if scale < -MAX_SHIFT_DIGITS {
        return Err(AmountError::ExponentOutOfRange(scale));
    }

    // mantissa < 10^(bits + 1), so past that scale the value is below 0.1
    // and rounds to zero.
    let bits = i64::try_from(mantissa.bits()).unwrap_or(i64::MAX);
    if scale > bits.saturating_add(1) {
        return Ok(BigInt::zero());
    }

    let (units, _) = BigDecimal::new(mantissa, scale)
        .with_scale_round(0, ROUNDING_MODE)
        .into_bigint_and_exponent();
    Ok(units)
}

/// Returns `units / 10^scale_exp` rounded to `precision` decimal places.
///
/// A negative `scale_exp` multiplies instead of dividing.
pub fn units_to_decimal(units: &BigInt, scale_exp: i64, precision: u32) -> BigDecimal {
    BigDecimal::new(units.clone(), scale_exp).with_scale_round(i64::from(precision), ROUNDING_MODE)
}

/// Renders `units / 10^exponent` in plain decimal notation.
///
/// Trailing fractional zeros are trimmed and the output never switches to
/// exponential notation, whatever the magnitude.
pub fn format_units(units: &BigInt, exponent: u32) -> String {
    let exponent = exponent as usize;
    let mut digits = units.magnitude().to_string();

    // Guarantee at least one integer digit.
    if digits.len() <= exponent {
        digits.insert_str(0, &"0".repeat(exponent + 1 - digits.len()));
    }

    let (integer, fraction) = digits.split_at(digits.len() - exponent);
    let fraction = fraction.trim_end_matches('0');
    let sign = if units.sign() == Sign::Minus { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn shift_whole_coin_to_units() {
        assert_eq!(
            shift_to_units(&dec("1.5"), 18).unwrap(),
            BigInt::from(1_500_000_000_000_000_000u128)
        );
    }

    #[test]
    fn shift_rounds_half_away_from_zero() {
        assert_eq!(shift_to_units(&dec("0.5"), 0).unwrap(), BigInt::from(1));
        assert_eq!(shift_to_units(&dec("-0.5"), 0).unwrap(), BigInt::from(-1));
        assert_eq!(shift_to_units(&dec("2.5"), 0).unwrap(), BigInt::from(3));
        assert_eq!(shift_to_units(&dec("0.49"), 0).unwrap(), BigInt::from(0));
        assert_eq!(shift_to_units(&dec("1.25"), 1).unwrap(), BigInt::from(13));
        assert_eq!(shift_to_units(&dec("-1.25"), 1).unwrap(), BigInt::from(-13));
    }

    #[test]
    fn negative_shift_divides() {
        assert_eq!(shift_to_units(&dec("1500"), -3).unwrap(), BigInt::from(2));
        assert_eq!(shift_to_units(&dec("1234"), -3).unwrap(), BigInt::from(1));
    }

    #[test]
    fn shift_exponent_overflow_is_an_error() {
        let tiny = BigDecimal::new(BigInt::from(1), i64::MIN + 5);
        assert_eq!(
            shift_to_units(&tiny, 18).unwrap_err(),
            AmountError::ExponentOutOfRange(18)
        );

        let huge_scale = BigDecimal::new(BigInt::from(1), i64::MAX - 5);
        assert_eq!(
            shift_to_units(&huge_scale, -18).unwrap_err(),
            AmountError::ExponentOutOfRange(-18)
        );
    }

    #[test]
    fn shift_rejects_oversized_results() {
        let err = shift_to_units(&dec("1e300000"), 18).unwrap_err();
        assert!(matches!(err, AmountError::ExponentOutOfRange(_)));

        // Right at the bound is still accepted.
        let units = shift_to_units(&dec("1"), MAX_SHIFT_DIGITS).unwrap();
        assert_eq!(units.to_string().len() as i64, MAX_SHIFT_DIGITS + 1);
    }

    #[test]
    fn shift_of_vanishing_value_is_zero() {
        let tiny = BigDecimal::new(BigInt::from(999), i64::MAX - 5);
        assert_eq!(shift_to_units(&tiny, 18).unwrap(), BigInt::zero());
        assert_eq!(shift_to_units(&dec("0.04"), 0).unwrap(), BigInt::zero());
        assert_eq!(shift_to_units(&dec("-0.6"), 0).unwrap(), BigInt::from(-1));
    }

    #[test]
    fn units_to_decimal_is_exact_within_precision() {
        let gwei = units_to_decimal(&BigInt::from(1_000_000_000u64), 9, 18);
        assert_eq!(gwei, dec("1"));

        let ether = units_to_decimal(&BigInt::from(1_500_000_000_000_000_000u128), 18, 18);
        assert_eq!(ether, dec("1.5"));
    }

    #[test]
    fn units_to_decimal_rounds_at_precision_not_scale() {
        // 500 units at scale 21 is 5e-19, which rounds to 1e-18 at 18 places.
        let value = units_to_decimal(&BigInt::from(500), 21, 18);
        assert_eq!(value, dec("0.000000000000000001"));

        let value = units_to_decimal(&BigInt::from(1), 21, 18);
        assert_eq!(value, dec("0"));
    }

    #[test]
    fn units_to_decimal_negative_scale_multiplies() {
        assert_eq!(units_to_decimal(&BigInt::from(7), -3, 0), dec("7000"));
    }

    #[test]
    fn format_trims_trailing_zeros() {
        let units = BigInt::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(&units, 18), "1.5");
        assert_eq!(format_units(&BigInt::from(123), 2), "1.23");
        assert_eq!(format_units(&BigInt::from(1000), 0), "1000");
        assert_eq!(format_units(&BigInt::from(0), 18), "0");
    }

    #[test]
    fn format_small_and_negative_values() {
        assert_eq!(format_units(&BigInt::from(-5), 2), "-0.05");
        assert_eq!(format_units(&BigInt::from(-1), 18), "-0.000000000000000001");
    }
}
