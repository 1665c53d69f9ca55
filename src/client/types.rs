//! Client-side types and error definitions.

use thiserror::Error;

use crate::chain::ChainError;

// Re-export transport settings from config module to avoid duplication
pub use crate::config::schema::{ClientConfig, TransportConfig};

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The chain descriptor is unusable.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// A transport URL could not be parsed.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// An address could not be parsed.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// A client or transport setting is out of range.
    #[error("Invalid client setting '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error from {method}: {message} (code {code})")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    /// Every attempt on every endpoint hit the per-attempt timeout.
    #[error("RPC {method} timed out after {timeout_ms}ms ({attempts} attempts)")]
    Timeout {
        method: &'static str,
        timeout_ms: u64,
        attempts: u32,
    },

    /// Every endpoint failed, at least once with a transport error.
    #[error("All RPC providers failed for {method} ({attempts} attempts)")]
    AllEndpointsFailed { method: &'static str, attempts: u32 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
