use coin_value::AmountError;
use thiserror::Error;

/// Ethereum chain operation errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("decoding error: {0}")]
    Decode(String),

    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}
