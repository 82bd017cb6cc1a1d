//! Ethereum/EVM chain support for the crypto-wallet.
//!
//! This crate provides:
//! - Exact ether amounts ([`Eth`]) with wei/kwei/mwei/gwei/ether views
//! - Address format validation
//! - Smart contract detection against any [`CodeProvider`]
//! - A JSON-RPC `eth_getCode` adapter over a pluggable transport

pub mod address;
pub mod contract;
pub mod error;
pub mod ether;
pub mod rpc;

// Re-export key public types for ergonomic imports.
pub use address::{is_valid_address, parse_address};
pub use contract::{is_smart_contract, is_smart_contract_at, BlockTag, CodeProvider};
pub use error::EthError;
pub use ether::{Eth, EthDefinition, ETHER, GWEI, KWEI, MWEI, WEI};
pub use rpc::{decode_code_response, get_code_request, JsonRpcClient, RpcTransport};
