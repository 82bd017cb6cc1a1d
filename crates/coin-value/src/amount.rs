//! The generic fixed-point amount engine.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::definition::CurrencyDefinition;
use crate::error::AmountError;
use crate::scale;

/// Currency-erased view of an amount.
///
/// Lets amounts of different currencies meet at runtime, where a mismatch
/// is reported as [`AmountError::MismatchedCurrency`].
pub trait Value {
    /// Exact quantity in the smallest unit.
    fn units(&self) -> &BigInt;

    /// Name of the currency the quantity is denominated in.
    fn currency_name(&self) -> &str;
}

/// An exact, immutable quantity of currency `D`.
///
/// The smallest-unit integer is the only state. Every operation returns a
/// new amount.
pub struct Amount<D: CurrencyDefinition> {
    units: BigInt,
    definition: PhantomData<fn() -> D>,
}

impl<D: CurrencyDefinition> Amount<D> {
    /// Creates an amount from a raw smallest-unit count (e.g. wei).
    pub fn from_units(units: impl Into<BigInt>) -> Self {
        Self {
            units: units.into(),
            definition: PhantomData,
        }
    }

    /// Like [`Amount::from_units`], treating an absent count as zero.
    pub fn from_units_opt(units: Option<BigInt>) -> Self {
        Self::from_units(units.unwrap_or_default())
    }

    pub fn zero() -> Self {
        Self::from_units(BigInt::zero())
    }

    /// Creates an amount from a whole-coin decimal (e.g. ether).
    ///
    /// Digits beyond the smallest unit are rounded half away from zero.
    pub fn from_coins(coins: &BigDecimal) -> Result<Self, AmountError> {
        Self::from_scaled(coins, D::UNIT_EXPONENT)
    }

    /// Creates an amount from a decimal denominated at `10^scale_exp`
    /// smallest units (e.g. `9` for gwei), so `units = value * 10^scale_exp`.
    ///
    /// This is the inverse of [`Amount::scaled_value`]. Scales above the
    /// whole coin are allowed. The result is rounded half away from zero to
    /// the nearest smallest unit.
    pub fn from_scaled(value: &BigDecimal, scale_exp: u32) -> Result<Self, AmountError> {
        scale::shift_to_units(value, i64::from(scale_exp)).map(Self::from_units)
    }

    /// Like [`Amount::from_scaled`] for a signed exponent.
    ///
    /// A negative exponent names a scale finer than the smallest unit and
    /// fails with [`AmountError::InvalidScale`].
    pub fn try_from_scaled(value: &BigDecimal, scale_exp: i32) -> Result<Self, AmountError> {
        let scale_exp = u32::try_from(scale_exp).map_err(|_| AmountError::InvalidScale(scale_exp))?;
        Self::from_scaled(value, scale_exp)
    }

    /// Exact quantity in the smallest unit. Never rounded.
    pub fn units(&self) -> &BigInt {
        &self.units
    }

    pub fn into_units(self) -> BigInt {
        self.units
    }

    /// Quantity in whole coins.
    pub fn coins(&self) -> BigDecimal {
        self.scaled_value(D::UNIT_EXPONENT)
    }

    /// Quantity denominated at `10^scale_exp` smallest units.
    ///
    /// The result is rounded to `D::UNIT_EXPONENT` decimal places whatever
    /// the requested scale: precision is set by the currency.
    pub fn scaled_value(&self, scale_exp: u32) -> BigDecimal {
        scale::units_to_decimal(&self.units, i64::from(scale_exp), D::UNIT_EXPONENT)
    }

    pub fn currency_name(&self) -> &'static str {
        D::NAME
    }

    pub fn unit_exponent(&self) -> u32 {
        D::UNIT_EXPONENT
    }

    pub fn is_zero(&self) -> bool {
        self.units.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.units.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self::from_units(self.units.abs())
    }

    /// Returns true iff `other` is denominated in the same currency.
    pub fn same_currency<V: Value + ?Sized>(&self, other: &V) -> bool {
        other.currency_name() == D::NAME
    }

    fn ensure_same_currency<V: Value + ?Sized>(&self, other: &V) -> Result<(), AmountError> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(AmountError::MismatchedCurrency {
                expected: D::NAME.to_string(),
                found: other.currency_name().to_string(),
            })
        }
    }

    pub fn checked_add<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.ensure_same_currency(other)?;
        Ok(Self::from_units(&self.units + other.units()))
    }

    pub fn checked_sub<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.ensure_same_currency(other)?;
        Ok(Self::from_units(&self.units - other.units()))
    }

    /// Multiplies the raw unit counts.
    pub fn checked_mul<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.ensure_same_currency(other)?;
        Ok(Self::from_units(&self.units * other.units()))
    }

    /// Divides the raw unit counts, truncating toward zero.
    pub fn checked_div<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.ensure_same_currency(other)?;
        if other.units().is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Self::from_units(&self.units / other.units()))
    }

    pub fn mul_scalar(&self, scalar: &BigInt) -> Self {
        Self::from_units(&self.units * scalar)
    }

    /// Divides by a bare integer, truncating toward zero.
    pub fn div_scalar(&self, scalar: &BigInt) -> Result<Self, AmountError> {
        if scalar.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        Ok(Self::from_units(&self.units / scalar))
    }
}

impl<D: CurrencyDefinition> Value for Amount<D> {
    fn units(&self) -> &BigInt {
        &self.units
    }

    fn currency_name(&self) -> &str {
        D::NAME
    }
}

// Manual impls: deriving would demand the same traits of the marker type.

impl<D: CurrencyDefinition> Clone for Amount<D> {
    fn clone(&self) -> Self {
        Self::from_units(self.units.clone())
    }
}

impl<D: CurrencyDefinition> Default for Amount<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: CurrencyDefinition> PartialEq for Amount<D> {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl<D: CurrencyDefinition> Eq for Amount<D> {}

impl<D: CurrencyDefinition> PartialOrd for Amount<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: CurrencyDefinition> Ord for Amount<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.units.cmp(&other.units)
    }
}

impl<D: CurrencyDefinition> Hash for Amount<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        D::NAME.hash(state);
        self.units.hash(state);
    }
}

impl<D: CurrencyDefinition> fmt::Debug for Amount<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Amount")
            .field("currency", &D::NAME)
            .field("units", &self.units)
            .finish()
    }
}

/// Formats as whole coins followed by the currency name, e.g. `1.5 ETH`.
impl<D: CurrencyDefinition> fmt::Display for Amount<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", scale::format_units(&self.units, D::UNIT_EXPONENT), D::NAME)
    }
}

/// Parses a whole-coin decimal such as `"0.25"`.
impl<D: CurrencyDefinition> FromStr for Amount<D> {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coins = BigDecimal::from_str(s.trim()).map_err(|e| AmountError::Parse(format!("{s:?}: {e}")))?;
        Self::from_coins(&coins).map_err(|e| AmountError::Parse(format!("{s:?}: {e}")))
    }
}

// Same type means same currency, so the operators cannot fail.

impl<D: CurrencyDefinition> Add for Amount<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_units(self.units + rhs.units)
    }
}

impl<'a, D: CurrencyDefinition> Add<&'a Amount<D>> for &'a Amount<D> {
    type Output = Amount<D>;

    fn add(self, rhs: &'a Amount<D>) -> Amount<D> {
        Amount::from_units(&self.units + &rhs.units)
    }
}

impl<D: CurrencyDefinition> Sub for Amount<D> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_units(self.units - rhs.units)
    }
}

impl<'a, D: CurrencyDefinition> Sub<&'a Amount<D>> for &'a Amount<D> {
    type Output = Amount<D>;

    fn sub(self, rhs: &'a Amount<D>) -> Amount<D> {
        Amount::from_units(&self.units - &rhs.units)
    }
}

impl<D: CurrencyDefinition> Neg for Amount<D> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_units(-self.units)
    }
}

/// Serialized as a decimal string of smallest units, which survives JSON
/// consumers that parse numbers as doubles.
impl<D: CurrencyDefinition> Serialize for Amount<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.units)
    }
}

impl<'de, D: CurrencyDefinition> Deserialize<'de> for Amount<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let raw = String::deserialize(deserializer)?;
        let units = BigInt::from_str(&raw)
            .map_err(|e| de::Error::custom(format!("invalid {} units {raw:?}: {e}", D::NAME)))?;
        Ok(Self::from_units(units))
    }
}
