//! Wire structures and decoding for the EVM JSON-RPC surface

use serde::{Deserialize, Serialize};

use crate::errors::RpcError;

/// A fetched block header. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    /// Unix timestamp, seconds
    pub timestamp: u64,
    /// Address that mined the block, as a 0x-prefixed hex string
    pub miner: String,
}

impl BlockHeader {
    /// Case-insensitive miner comparison against a configured address
    pub fn mined_by(&self, address: &str) -> bool {
        self.miner.eq_ignore_ascii_case(address.trim())
    }
}

/// One JSON-RPC 2.0 response envelope (also the element type of a batch
/// response array)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: serde_json::Value,
    pub result: Option<serde_json::Value>,
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Extract the result payload, mapping a JSON-RPC error object to
    /// [`RpcError::Endpoint`] and a missing/null result to
    /// [`RpcError::MissingField`].
    pub fn into_result(self) -> Result<serde_json::Value, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Endpoint {
                code: error.code,
                message: error.message,
            });
        }
        match self.result {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(RpcError::MissingField {
                field: "result".to_string(),
            }),
        }
    }
}

/// Block object as returned by `eth_getBlockByNumber`, reduced to the
/// fields the monitor reads
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub number: String,
    pub timestamp: String,
    pub miner: String,
}

impl TryFrom<RawBlock> for BlockHeader {
    type Error = RpcError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(BlockHeader {
            number: parse_quantity(&raw.number)?,
            timestamp: parse_quantity(&raw.timestamp)?,
            miner: raw.miner,
        })
    }
}

/// Parse a 0x-prefixed hex quantity into a u64
pub fn parse_quantity(value: &str) -> Result<u64, RpcError> {
    let hex = value.strip_prefix("0x").ok_or_else(|| RpcError::InvalidQuantity {
        value: value.to_string(),
    })?;
    if hex.is_empty() {
        return Err(RpcError::InvalidQuantity {
            value: value.to_string(),
        });
    }
    u64::from_str_radix(hex, 16).map_err(|_| RpcError::InvalidQuantity {
        value: value.to_string(),
    })
}

/// Format a block number as a JSON-RPC hex quantity
pub fn to_quantity(number: u64) -> String {
    format!("0x{:x}", number)
}

/// Decode the 32-byte return word of a `bool`-returning `eth_call`
pub fn decode_bool(value: &str) -> Result<bool, RpcError> {
    let hex = value.strip_prefix("0x").unwrap_or(value);
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RpcError::InvalidQuantity {
            value: value.to_string(),
        });
    }
    Ok(hex.chars().any(|c| c != '0'))
}

/// ABI-encode a single address argument: strip the prefix and left-pad to
/// a 32-byte word
pub fn encode_address_arg(address: &str) -> String {
    let trimmed = address.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed).to_lowercase();
    format!("{:0>64}", hex)
}
