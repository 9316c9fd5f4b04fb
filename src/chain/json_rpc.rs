use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use alloy_primitives::{hex, Address, Bytes};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{BlockRef, ChainConnector, ChainError, ChainReader};

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    jsonrpc: &'static str,
    pub method: JsonRpcMethod,
    pub params: Value,
    id: u64,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: JsonRpcMethod, params: Value) -> Self {
        JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Geth reports reverts as code 3; other clients only say so in the message.
    fn is_revert(&self) -> bool {
        self.code == 3 || self.message.to_ascii_lowercase().contains("revert")
    }
}

impl From<JsonRpcError> for ChainError {
    fn from(error: JsonRpcError) -> Self {
        if error.is_revert() {
            let detail = match &error.data {
                Some(Value::String(data)) => format!("{} ({})", error.message, data),
                _ => error.message,
            };
            ChainError::Reverted(detail)
        } else {
            ChainError::Rpc {
                code: error.code,
                message: error.message,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JsonRpcMethod {
    #[serde(rename = "eth_call")]
    Call,
    #[serde(rename = "eth_blockNumber")]
    BlockNumber,
}

/// `ChainReader` over HTTP JSON-RPC.
pub struct HttpChainReader {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpChainReader {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        HttpChainReader {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn request(&self, method: JsonRpcMethod, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);
        debug!("JSON-RPC request {:?} id={}", method, id);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Transport(format!(
                "provider answered HTTP {}",
                status
            )));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Transport(e.without_url().to_string()))?;

        if let Some(error) = body.error {
            return Err(error.into());
        }
        body.result
            .ok_or_else(|| ChainError::Decode("response has neither result nor error".to_string()))
    }
}

fn result_str(value: &Value) -> Result<&str, ChainError> {
    value
        .as_str()
        .ok_or_else(|| ChainError::Decode(format!("expected a hex string, got {}", value)))
}

#[async_trait]
impl ChainReader for HttpChainReader {
    async fn block_number(&self) -> Result<u64, ChainError> {
        let result = self.request(JsonRpcMethod::BlockNumber, json!([])).await?;
        let quantity = result_str(&result)?;
        u64::from_str_radix(quantity.trim_start_matches("0x"), 16)
            .map_err(|e| ChainError::Decode(format!("invalid block number {}: {}", quantity, e)))
    }

    async fn call(&self, to: Address, data: Bytes, block: BlockRef) -> Result<Bytes, ChainError> {
        let params = json!([
            {
                "to": hex::encode_prefixed(to),
                "data": hex::encode_prefixed(&data),
            },
            block.as_tag(),
        ]);
        let result = self.request(JsonRpcMethod::Call, params).await?;
        let raw = result_str(&result)?;
        hex::decode(raw)
            .map(Bytes::from)
            .map_err(|e| ChainError::Decode(format!("invalid hex in call result: {}", e)))
    }
}

/// Hands out `HttpChainReader`s sharing one connection pool.
#[derive(Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpConnector { client })
    }
}

impl ChainConnector for HttpConnector {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn ChainReader>, ChainError> {
        reqwest::Url::parse(endpoint)
            .map_err(|e| ChainError::Transport(format!("invalid RPC endpoint: {}", e)))?;
        let reader: Arc<dyn ChainReader> =
            Arc::new(HttpChainReader::new(self.client.clone(), endpoint));
        Ok(reader)
    }
}
