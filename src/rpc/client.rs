use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::types::{
    decode_bool, encode_address_arg, to_quantity, BlockHeader, JsonRpcResponse, RawBlock,
};
use crate::constants::abi;

/// Thin JSON-RPC client shared by all quorum fan-outs. Holds one
/// connection-pooled `reqwest::Client`; the endpoint URL is chosen per
/// call by the quorum layer.
#[derive(Clone)]
pub struct RpcClient {
    http: Client,
}

impl RpcClient {
    /// `request_timeout` should match the quorum deadline; the quorum
    /// layer stops waiting at that bound regardless.
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { http })
    }

    /// Fetch the latest block header from one endpoint
    pub async fn latest_header(&self, endpoint: &str) -> Result<BlockHeader> {
        let request_body = json!({
            "jsonrpc": "2.0",
            "method": "eth_getBlockByNumber",
            "params": ["latest", false],
            "id": 1
        });

        let response = self.post(endpoint, &request_body).await?;
        let envelope: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", endpoint, e))?;

        decode_header(envelope)
    }

    /// Fetch an inclusive range of block headers from one endpoint as a
    /// single JSON-RPC batch round trip. Per-entry errors and null
    /// results are dropped from the returned vec; only transport-level
    /// failures fail the whole batch.
    pub async fn headers_in_range(
        &self,
        endpoint: &str,
        first: u64,
        last: u64,
    ) -> Result<Vec<BlockHeader>> {
        let batch: Vec<_> = (first..=last)
            .map(|number| {
                json!({
                    "jsonrpc": "2.0",
                    "method": "eth_getBlockByNumber",
                    "params": [to_quantity(number), false],
                    "id": number
                })
            })
            .collect();

        let response = self.post(endpoint, &batch).await?;
        let envelopes: Vec<JsonRpcResponse> = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse batch response from {}: {}", endpoint, e))?;

        let mut headers = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            match decode_header(envelope) {
                Ok(header) => headers.push(header),
                Err(e) => debug!("Dropping batch entry from {}: {}", endpoint, e),
            }
        }
        Ok(headers)
    }

    /// Ask one endpoint whether `mining_address` is an active validator,
    /// via a read-only `eth_call` against the validator-set contract
    pub async fn is_validator(
        &self,
        endpoint: &str,
        validator_set_address: &str,
        mining_address: &str,
    ) -> Result<bool> {
        let data = format!(
            "0x{}{}",
            abi::IS_VALIDATOR_SELECTOR,
            encode_address_arg(mining_address)
        );
        let request_body = json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                { "to": validator_set_address, "data": data },
                "latest"
            ],
            "id": 1
        });

        let response = self.post(endpoint, &request_body).await?;
        let envelope: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", endpoint, e))?;

        let result = envelope.into_result()?;
        let word = result
            .as_str()
            .ok_or_else(|| anyhow!("eth_call result from {} is not a string", endpoint))?;
        Ok(decode_bool(word)?)
    }

    async fn post<B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request to {} failed: {}", endpoint, e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Endpoint {} returned HTTP {}",
                endpoint,
                response.status()
            ));
        }
        Ok(response)
    }
}

fn decode_header(envelope: JsonRpcResponse) -> Result<BlockHeader> {
    let result = envelope.into_result()?;
    let raw: RawBlock = serde_json::from_value(result)
        .map_err(|e| anyhow!("Malformed block object: {}", e))?;
    Ok(BlockHeader::try_from(raw)?)
}
