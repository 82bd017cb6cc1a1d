//! # coin-value
//!
//! Exact fixed-point amounts for the crypto-wallet.
//!
//! An [`Amount`] stores an arbitrary-precision count of a currency's
//! smallest unit and is bound at the type level to a
//! [`CurrencyDefinition`]. Decimal views (whole coins, or any named
//! subunit scale) are recomputed from that integer on demand, so rounding
//! only ever happens at the presentation boundary and never compounds.
//!
//! Arithmetic between amounts is checked: mixing currencies or dividing by
//! zero returns an [`AmountError`] instead of aborting.

pub mod amount;
pub mod definition;
pub mod error;
pub mod scale;

// Re-export key public types for ergonomic imports.
pub use amount::{Amount, Value};
pub use bigdecimal::BigDecimal;
pub use definition::CurrencyDefinition;
pub use error::AmountError;
pub use num_bigint::BigInt;
