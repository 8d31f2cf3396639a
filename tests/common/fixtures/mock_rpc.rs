//! Mock EVM JSON-RPC endpoint for testing the polling engine
//!
//! Serves an in-memory chain: single and batched `eth_getBlockByNumber`
//! plus the `eth_call` validator check, without requiring a real node.
//! The chain spec sits behind a mutex so tests can advance the head
//! between polling cycles.

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

/// Description of the chain one mock endpoint serves
#[derive(Debug, Clone)]
pub struct ChainSpec {
    /// Highest block number the endpoint knows about
    pub head: u64,
    /// Seconds between consecutive blocks
    pub block_time: u64,
    /// `timestamp(n) = base_timestamp + n * block_time`
    pub base_timestamp: u64,
    /// Miner reported for blocks not listed in `monitored_blocks`
    pub default_miner: String,
    /// Mining address of the monitored validator
    pub monitored_miner: String,
    /// Block numbers reported as mined by the monitored validator
    pub monitored_blocks: Vec<u64>,
    /// Answer to the `isValidator` contract call
    pub is_validator: bool,
    /// When set, `eth_call` returns a JSON-RPC error instead of a result
    pub validator_call_fails: bool,
}

impl ChainSpec {
    pub fn new(head: u64, block_time: u64) -> Self {
        Self {
            head,
            block_time,
            base_timestamp: 0,
            default_miner: "0x1111111111111111111111111111111111111111".to_string(),
            monitored_miner: "0x2222222222222222222222222222222222222222".to_string(),
            monitored_blocks: Vec::new(),
            is_validator: true,
            validator_call_fails: false,
        }
    }

    pub fn timestamp_of(&self, number: u64) -> u64 {
        self.base_timestamp + number * self.block_time
    }

    fn block_json(&self, number: u64) -> Value {
        if number > self.head {
            return Value::Null;
        }
        let miner = if self.monitored_blocks.contains(&number) {
            &self.monitored_miner
        } else {
            &self.default_miner
        };
        json!({
            "number": format!("0x{:x}", number),
            "timestamp": format!("0x{:x}", self.timestamp_of(number)),
            "miner": miner,
        })
    }

    fn answer(&self, call: &Value) -> Value {
        let id = call.get("id").cloned().unwrap_or(Value::Null);
        let method = call.get("method").and_then(Value::as_str).unwrap_or("");
        match method {
            "eth_getBlockByNumber" => {
                let param = call["params"][0].as_str().unwrap_or("");
                let result = if param == "latest" {
                    self.block_json(self.head)
                } else {
                    let number = param
                        .strip_prefix("0x")
                        .and_then(|hex| u64::from_str_radix(hex, 16).ok());
                    number.map(|n| self.block_json(n)).unwrap_or(Value::Null)
                };
                json!({ "jsonrpc": "2.0", "id": id, "result": result })
            }
            "eth_call" => {
                if self.validator_call_fails {
                    json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": { "code": -32000, "message": "execution reverted" }
                    })
                } else {
                    let word = format!("0x{:0>64}", if self.is_validator { "1" } else { "0" });
                    json!({ "jsonrpc": "2.0", "id": id, "result": word })
                }
            }
            _ => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "method not found" }
            }),
        }
    }
}

struct ChainResponder {
    spec: Arc<Mutex<ChainSpec>>,
    delay: Option<Duration>,
}

impl Respond for ChainResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let spec = self.spec.lock().unwrap();
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };

        let response_body = match &body {
            Value::Array(calls) => Value::Array(calls.iter().map(|c| spec.answer(c)).collect()),
            call => spec.answer(call),
        };

        let template = ResponseTemplate::new(200).set_body_json(response_body);
        match self.delay {
            Some(delay) => template.set_delay(delay),
            None => template,
        }
    }
}

/// One mock RPC endpoint, with a handle to mutate its chain between cycles
pub struct MockRpcEndpoint {
    pub server: MockServer,
    pub url: String,
    spec: Arc<Mutex<ChainSpec>>,
}

impl MockRpcEndpoint {
    pub async fn start(spec: ChainSpec) -> Self {
        Self::start_with_delay(spec, None).await
    }

    /// Endpoint whose every response arrives after `delay`
    pub async fn start_delayed(spec: ChainSpec, delay: Duration) -> Self {
        Self::start_with_delay(spec, Some(delay)).await
    }

    async fn start_with_delay(spec: ChainSpec, delay: Option<Duration>) -> Self {
        let server = MockServer::start().await;
        let url = server.uri();
        let spec = Arc::new(Mutex::new(spec));
        Mock::given(method("POST"))
            .respond_with(ChainResponder {
                spec: spec.clone(),
                delay,
            })
            .mount(&server)
            .await;
        Self { server, url, spec }
    }

    /// Endpoint that fails every request with HTTP 500
    pub async fn start_unreachable() -> Self {
        let server = MockServer::start().await;
        let url = server.uri();
        let spec = Arc::new(Mutex::new(ChainSpec::new(0, 1)));
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Self { server, url, spec }
    }

    /// Mutate the served chain (advance the head, flip the validator
    /// answer, ...) between polling cycles
    pub fn update_chain(&self, update: impl FnOnce(&mut ChainSpec)) {
        update(&mut self.spec.lock().unwrap());
    }

    /// Replace all mounted mocks with HTTP 500 responses
    pub async fn go_down(&self) {
        self.server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }
}
