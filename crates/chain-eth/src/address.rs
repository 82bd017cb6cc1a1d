use alloy_primitives::Address;

use crate::error::EthError;

/// Returns true iff `address` is `0x` followed by exactly 40 hex digits.
///
/// Only the format is checked. Hex digits may be any case and the EIP-55
/// mixed-case checksum is not verified.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex_part) => hex_part.len() == 40 && hex_part.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parses a `0x`-prefixed address string into a 20-byte [`Address`].
pub fn parse_address(address: &str) -> Result<Address, EthError> {
    if !is_valid_address(address) {
        return Err(EthError::InvalidAddress(address.to_string()));
    }

    address
        .parse::<Address>()
        .map_err(|e| EthError::InvalidAddress(format!("{address}: {e}")))
}
