//! Contract detection: an address is a smart contract iff the chain
//! reports non-empty bytecode for it.

use std::fmt;

use alloy_primitives::{Address, Bytes};
use log::debug;

use crate::address::parse_address;
use crate::error::EthError;

/// Block at which chain state is queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl BlockTag {
    /// JSON-RPC block parameter: a tag name or a hex quantity.
    pub fn to_rpc_param(&self) -> String {
        match self {
            BlockTag::Latest => "latest".into(),
            BlockTag::Earliest => "earliest".into(),
            BlockTag::Pending => "pending".into(),
            BlockTag::Number(n) => format!("{n:#x}"),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rpc_param())
    }
}

/// Chain client capability for reading deployed bytecode.
///
/// Timeouts, retries and cancellation are the implementor's concern.
pub trait CodeProvider {
    /// Returns the code stored at `address` as of `block`. Externally owned
    /// accounts have empty code.
    fn code_at(&self, address: Address, block: BlockTag) -> Result<Bytes, EthError>;
}

impl<T: CodeProvider + ?Sized> CodeProvider for &T {
    fn code_at(&self, address: Address, block: BlockTag) -> Result<Bytes, EthError> {
        (**self).code_at(address, block)
    }
}

/// Returns whether `address` holds contract code at the latest block.
pub fn is_smart_contract<C: CodeProvider + ?Sized>(address: &str, client: &C) -> Result<bool, EthError> {
    is_smart_contract_at(address, BlockTag::Latest, client)
}

/// Returns whether `address` holds contract code at `block`.
///
/// The address format is checked before any call reaches the client.
/// Client errors are returned as-is; transport failures gain context.
pub fn is_smart_contract_at<C: CodeProvider + ?Sized>(
    address: &str,
    block: BlockTag,
    client: &C,
) -> Result<bool, EthError> {
    let addr = parse_address(address)?;

    debug!("fetching bytecode for {addr} at {block}");
    let code = client
        .code_at(addr, block)
        .map_err(|e| match e {
            EthError::Transport(msg) => EthError::Transport(format!("failed to get bytecode: {msg}")),
            other => other,
        })?;
    debug!("{addr} has {} bytes of code", code.len());

    Ok(!code.is_empty())
}
