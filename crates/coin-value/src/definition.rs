/// Static metadata describing one currency.
///
/// Implemented by zero-sized marker types; an [`Amount`](crate::Amount)
/// carries its definition purely at the type level, so every amount of a
/// currency shares the same metadata without storing it.
///
/// Two amounts are considered the same currency iff their `NAME`s are equal.
pub trait CurrencyDefinition: Send + Sync + 'static {
    /// Ticker-style identifier, e.g. `"ETH"`.
    const NAME: &'static str;

    /// Number of decimal digits between the smallest unit and one whole
    /// coin. Ethereum has 10^18 wei per ether, so its exponent is 18.
    const UNIT_EXPONENT: u32;
}
