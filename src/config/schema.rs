//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the chain client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::chain::{renegade_testnet, ChainDescriptor};

/// Root configuration for a chain client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainClientConfig {
    /// Chain descriptor (Renegade Testnet unless overridden).
    pub chain: ChainDescriptor,

    /// HTTP JSON-RPC transport settings.
    pub transport: TransportConfig,

    /// Client-level polling and caching.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Darkpool contract settings.
    pub darkpool: DarkpoolConfig,
}

impl Default for ChainClientConfig {
    fn default() -> Self {
        Self {
            chain: renegade_testnet(),
            transport: TransportConfig::default(),
            client: ClientConfig::default(),
            observability: ObservabilityConfig::default(),
            darkpool: DarkpoolConfig::default(),
        }
    }
}

/// HTTP transport configuration.
///
/// Defaults match an unmodified HTTP transport: 10s timeout, 3 retries with
/// exponential backoff starting at 150ms, no batching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// JSON-RPC endpoint. Falls back to the chain's default RPC URL.
    pub url: Option<String>,

    /// Failover JSON-RPC endpoint URLs, tried in order after the primary.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Retries per endpoint after the first attempt.
    pub retry_count: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub retry_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: None,
            failover_urls: Vec::new(),
            timeout_ms: 10_000,
            retry_count: 3,
            retry_delay_ms: 150,
            max_retry_delay_ms: 5_000,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Interval between polls for watch actions, in milliseconds.
    pub polling_interval_ms: u64,

    /// How long cached responses stay valid. Defaults to the polling interval.
    pub cache_time_ms: Option<u64>,
}

impl ClientConfig {
    /// Effective cache time in milliseconds.
    pub fn cache_time_ms(&self) -> u64 {
        self.cache_time_ms.unwrap_or(self.polling_interval_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: 4_000,
            cache_time_ms: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Darkpool contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DarkpoolConfig {
    /// Address of the darkpool contract emitting wallet events.
    pub address: String,

    /// First block scanned by wallet lookups.
    pub from_block: u64,
}

impl Default for DarkpoolConfig {
    fn default() -> Self {
        Self {
            address: crate::darkpool::DEFAULT_DARKPOOL_ADDRESS.to_string(),
            from_block: 0,
        }
    }
}
