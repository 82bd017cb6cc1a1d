//! JSON-RPC adapter implementing [`CodeProvider`] via `eth_getCode`.
//!
//! The HTTP (or IPC, or WebSocket) layer is left to an [`RpcTransport`]
//! implementation; this module only builds requests and decodes responses.

use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, Bytes};
use log::trace;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::contract::{BlockTag, CodeProvider};
use crate::error::EthError;

/// Sends one JSON-RPC request and returns the raw response envelope.
pub trait RpcTransport {
    fn call(&self, request: &Value) -> Result<Value, EthError>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Builds a JSON-RPC 2.0 `eth_getCode` request.
pub fn get_code_request(id: u64, address: &Address, block: BlockTag) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "eth_getCode",
        "params": [format!("{address:#x}"), block.to_rpc_param()],
    })
}

/// Decodes an `eth_getCode` response envelope into the returned bytecode.
pub fn decode_code_response(response: Value) -> Result<Bytes, EthError> {
    let response: RpcResponse =
        serde_json::from_value(response).map_err(|e| EthError::Decode(format!("malformed response: {e}")))?;

    if let Some(err) = response.error {
        return Err(EthError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    let result = response
        .result
        .ok_or_else(|| EthError::Decode("response has neither result nor error".into()))?;
    let hex_str = result
        .strip_prefix("0x")
        .ok_or_else(|| EthError::Decode(format!("result is not 0x-prefixed: {result}")))?;

    let code = hex::decode(hex_str).map_err(|e| EthError::Decode(format!("invalid hex: {e}")))?;
    Ok(Bytes::from(code))
}

/// A [`CodeProvider`] backed by a JSON-RPC node.
///
/// Request ids increase monotonically; the client can be shared across
/// threads when the transport can.
#[derive(Debug)]
pub struct JsonRpcClient<T> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcTransport> JsonRpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: RpcTransport> CodeProvider for JsonRpcClient<T> {
    fn code_at(&self, address: Address, block: BlockTag) -> Result<Bytes, EthError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = get_code_request(id, &address, block);

        trace!("-> {request}");
        let response = self.transport.call(&request)?;
        trace!("<- {response}");

        decode_code_response(response)
    }
}
