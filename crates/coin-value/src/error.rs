use thiserror::Error;

/// Amount arithmetic and conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("mismatched currency: expected {expected}, found {found}")]
    MismatchedCurrency { expected: String, found: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid scale exponent: {0}")]
    InvalidScale(i32),

    #[error("decimal exponent out of range: {0}")]
    ExponentOutOfRange(i64),

    #[error("invalid amount: {0}")]
    Parse(String),
}
