//! Ether amounts: the generic [`Amount`] engine bound to ETH, with
//! accessors for the standard wei denominations.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use alloy_primitives::U256;
use coin_value::{Amount, AmountError, BigDecimal, BigInt, CurrencyDefinition, Value};
use num_bigint::Sign;
use serde::{Deserialize, Serialize};

use crate::error::EthError;

/// Ether: 10^18 wei per coin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EthDefinition;

impl CurrencyDefinition for EthDefinition {
    const NAME: &'static str = "ETH";
    const UNIT_EXPONENT: u32 = 18;
}

/// Scale exponent of wei, the smallest unit.
pub const WEI: u32 = 0;
/// Scale exponent of kwei (babbage).
pub const KWEI: u32 = 3;
/// Scale exponent of mwei (lovelace).
pub const MWEI: u32 = 6;
/// Scale exponent of gwei (shannon).
pub const GWEI: u32 = 9;
/// Scale exponent of one ether.
pub const ETHER: u32 = 18;

/// An exact amount of ether, stored in wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Eth(Amount<EthDefinition>);

impl Eth {
    /// Creates an amount from a decimal number of ether.
    pub fn new(ether: &BigDecimal) -> Result<Self, AmountError> {
        Amount::from_coins(ether).map(Self)
    }

    pub fn zero() -> Self {
        Self(Amount::zero())
    }

    pub fn from_wei(wei: impl Into<BigInt>) -> Self {
        Self(Amount::from_units(wei))
    }

    pub fn from_kwei(kwei: &BigDecimal) -> Result<Self, AmountError> {
        Amount::from_scaled(kwei, KWEI).map(Self)
    }

    pub fn from_mwei(mwei: &BigDecimal) -> Result<Self, AmountError> {
        Amount::from_scaled(mwei, MWEI).map(Self)
    }

    pub fn from_gwei(gwei: &BigDecimal) -> Result<Self, AmountError> {
        Amount::from_scaled(gwei, GWEI).map(Self)
    }

    /// Exact value in wei.
    pub fn wei(&self) -> &BigInt {
        self.0.units()
    }

    pub fn kwei(&self) -> BigDecimal {
        self.0.scaled_value(KWEI)
    }

    pub fn mwei(&self) -> BigDecimal {
        self.0.scaled_value(MWEI)
    }

    pub fn gwei(&self) -> BigDecimal {
        self.0.scaled_value(GWEI)
    }

    pub fn ether(&self) -> BigDecimal {
        self.0.coins()
    }

    /// Converts to an on-chain `uint256` wei value.
    ///
    /// Fails with [`EthError::AmountOutOfRange`] for negative amounts and for
    /// amounts above `2^256 - 1` wei.
    pub fn to_u256(&self) -> Result<U256, EthError> {
        let wei = self
            .wei()
            .to_biguint()
            .ok_or_else(|| EthError::AmountOutOfRange(format!("negative value {self}")))?;

        U256::try_from_be_slice(&wei.to_bytes_be())
            .ok_or_else(|| EthError::AmountOutOfRange(format!("{self} exceeds uint256")))
    }

    pub fn as_amount(&self) -> &Amount<EthDefinition> {
        &self.0
    }

    pub fn into_amount(self) -> Amount<EthDefinition> {
        self.0
    }

    pub fn checked_add<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.0.checked_add(other).map(Self)
    }

    pub fn checked_sub<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.0.checked_sub(other).map(Self)
    }

    pub fn checked_mul<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.0.checked_mul(other).map(Self)
    }

    pub fn checked_div<V: Value + ?Sized>(&self, other: &V) -> Result<Self, AmountError> {
        self.0.checked_div(other).map(Self)
    }

    pub fn mul_scalar(&self, scalar: &BigInt) -> Self {
        Self(self.0.mul_scalar(scalar))
    }

    pub fn div_scalar(&self, scalar: &BigInt) -> Result<Self, AmountError> {
        self.0.div_scalar(scalar).map(Self)
    }
}

impl Deref for Eth {
    type Target = Amount<EthDefinition>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Value for Eth {
    fn units(&self) -> &BigInt {
        self.0.units()
    }

    fn currency_name(&self) -> &str {
        EthDefinition::NAME
    }
}

impl From<Amount<EthDefinition>> for Eth {
    fn from(amount: Amount<EthDefinition>) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Eth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Eth {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<U256> for Eth {
    fn from(wei: U256) -> Self {
        Self::from_wei(BigInt::from_bytes_be(Sign::Plus, &wei.to_be_bytes::<32>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn one_and_a_half_ether_in_wei() {
        let eth = Eth::new(&dec("1.5")).unwrap();
        assert_eq!(eth.wei(), &BigInt::from(1_500_000_000_000_000_000u128));
    }

    #[test]
    fn one_gwei() {
        let eth = Eth::from_wei(1_000_000_000u64);
        assert_eq!(eth.gwei(), dec("1"));
    }

    #[test]
    fn named_constructors_agree() {
        let one_gwei = Eth::from_wei(1_000_000_000u64);
        assert_eq!(Eth::from_gwei(&dec("1")).unwrap(), one_gwei);
        assert_eq!(Eth::from_mwei(&dec("1000")).unwrap(), one_gwei);
        assert_eq!(Eth::from_kwei(&dec("1000000")).unwrap(), one_gwei);
        assert_eq!(Eth::new(&dec("0.000000001")).unwrap(), one_gwei);
    }

    #[test]
    fn small_denominations_scale_up_to_wei() {
        assert_eq!(Eth::from_kwei(&dec("1")).unwrap().wei(), &BigInt::from(1_000));
        assert_eq!(Eth::from_mwei(&dec("1")).unwrap().wei(), &BigInt::from(1_000_000));
        assert_eq!(Eth::from_kwei(&dec("2.5")).unwrap().kwei(), dec("2.5"));
        assert_eq!(Eth::from_mwei(&dec("0.75")).unwrap().mwei(), dec("0.75"));
    }

    #[test]
    fn named_accessors() {
        let eth = Eth::new(&dec("2")).unwrap();
        assert_eq!(eth.ether(), dec("2"));
        assert_eq!(eth.gwei(), dec("2000000000"));
        assert_eq!(eth.mwei(), dec("2000000000000"));
        assert_eq!(eth.kwei(), dec("2000000000000000"));
    }

    #[test]
    fn fractional_gwei() {
        let eth = Eth::from_gwei(&dec("1.5")).unwrap();
        assert_eq!(eth.wei(), &BigInt::from(1_500_000_000u64));
        assert_eq!(eth.gwei(), dec("1.5"));
    }

    #[test]
    fn arithmetic_returns_eth() {
        let sum: Eth = Eth::new(&dec("1")).unwrap().checked_add(&Eth::new(&dec("2")).unwrap()).unwrap();
        assert_eq!(sum.wei(), Eth::new(&dec("3")).unwrap().wei());

        let fee = Eth::from_gwei(&dec("50")).unwrap().mul_scalar(&BigInt::from(21_000));
        assert_eq!(fee.ether(), dec("0.00105"));

        let half = fee.div_scalar(&BigInt::from(2)).unwrap();
        assert_eq!(half.gwei(), dec("525000"));
    }

    #[test]
    fn deref_exposes_generic_accessors() {
        let eth = Eth::new(&dec("1")).unwrap();
        assert_eq!(eth.currency_name(), "ETH");
        assert_eq!(eth.unit_exponent(), 18);
        assert_eq!(eth.scaled_value(ETHER), dec("1"));
        assert_eq!(eth.scaled_value(WEI), dec("1000000000000000000"));
    }

    #[test]
    fn display_and_parse() {
        let eth: Eth = "0.05".parse().unwrap();
        assert_eq!(eth.to_string(), "0.05 ETH");
    }

    #[test]
    fn serde_is_transparent() {
        let eth = Eth::from_gwei(&dec("1")).unwrap();
        assert_eq!(serde_json::to_string(&eth).unwrap(), "\"1000000000\"");
    }

    #[test]
    fn u256_round_trip() {
        let eth = Eth::new(&dec("1")).unwrap();
        let wei = eth.to_u256().unwrap();
        assert_eq!(wei, U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(Eth::from(wei), eth);
    }

    #[test]
    fn u256_max_fits() {
        let eth = Eth::from(U256::MAX);
        assert_eq!(eth.to_u256().unwrap(), U256::MAX);
    }

    #[test]
    fn negative_does_not_fit_u256() {
        let err = Eth::from_wei(-1).to_u256().unwrap_err();
        assert!(matches!(err, EthError::AmountOutOfRange(_)));
    }

    #[test]
    fn overflow_does_not_fit_u256() {
        let too_big = Eth::from(U256::MAX).checked_add(&Eth::from_wei(1)).unwrap();
        let err = too_big.to_u256().unwrap_err();
        assert!(matches!(err, EthError::AmountOutOfRange(_)));
    }
}
