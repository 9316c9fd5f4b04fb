//! Read-only access to EVM contracts.
//!
//! `ChainReader` is the transport seam (one `eth_call` / `eth_blockNumber`
//! at a time), `contracts` layers typed adapters on top of it and
//! `json_rpc` provides the HTTP implementation used in production.

pub mod abi;
pub mod contracts;
pub mod json_rpc;

use std::{fmt, sync::Arc};

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    /// The endpoint could not be reached or answered with a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),
    /// JSON-RPC error object that is not a contract revert (rate limit, bad key, ...).
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("failed to decode call result: {0}")]
    Decode(String),
}

impl ChainError {
    /// True when the provider itself failed, as opposed to the called contract.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, ChainError::Transport(_) | ChainError::Rpc { .. })
    }
}

/// Block a read is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRef {
    Latest,
    Number(u64),
}

impl BlockRef {
    /// JSON-RPC block tag ("latest" or a 0x-prefixed quantity).
    pub fn as_tag(&self) -> String {
        match self {
            BlockRef::Latest => "latest".to_string(),
            BlockRef::Number(n) => format!("{:#x}", n),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Latest => write!(f, "latest"),
            BlockRef::Number(n) => write!(f, "{}", n),
        }
    }
}

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Current head block number.
    async fn block_number(&self) -> Result<u64, ChainError>;

    /// Execute a read-only call of `data` against `to` at `block`.
    async fn call(&self, to: Address, data: Bytes, block: BlockRef) -> Result<Bytes, ChainError>;
}

/// Builds a reader for an endpoint URL. Connecting is not a network call;
/// the first request is.
pub trait ChainConnector: Send + Sync {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn ChainReader>, ChainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag() {
        assert_eq!(BlockRef::Latest.as_tag(), "latest");
        assert_eq!(BlockRef::Number(0).as_tag(), "0x0");
        assert_eq!(BlockRef::Number(38_000_000).as_tag(), "0x243d580");
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(ChainError::Transport("timeout".into()).is_provider_failure());
        assert!(ChainError::Rpc {
            code: -32005,
            message: "limit exceeded".into()
        }
        .is_provider_failure());
        assert!(!ChainError::Reverted("no rewards".into()).is_provider_failure());
        assert!(!ChainError::Decode("empty".into()).is_provider_failure());
    }
}
