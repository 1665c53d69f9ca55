//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem found is
//! reported, not just the first one.

use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::chain::descriptor::parse_http_url;
use crate::chain::ChainError;
use crate::config::schema::ChainClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain: {0}")]
    Chain(#[from] ChainError),

    #[error("transport.{field}: {reason}")]
    Transport { field: &'static str, reason: String },

    #[error("client.{field}: {reason}")]
    Client { field: &'static str, reason: String },

    #[error("observability.{field}: {reason}")]
    Observability { field: &'static str, reason: String },

    #[error("darkpool.address: invalid address '{0}'")]
    DarkpoolAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ChainClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.chain.validate() {
        errors.push(ValidationError::Chain(e));
    }

    let transport = &config.transport;
    if let Some(url) = &transport.url {
        if let Err(e) = parse_http_url(url) {
            errors.push(ValidationError::Transport {
                field: "url",
                reason: e.to_string(),
            });
        }
    }
    for url in &transport.failover_urls {
        if let Err(e) = parse_http_url(url) {
            errors.push(ValidationError::Transport {
                field: "failover_urls",
                reason: e.to_string(),
            });
        }
    }
    if transport.timeout_ms == 0 {
        errors.push(ValidationError::Transport {
            field: "timeout_ms",
            reason: "must be greater than zero".to_string(),
        });
    }
    if transport.max_retry_delay_ms < transport.retry_delay_ms {
        errors.push(ValidationError::Transport {
            field: "max_retry_delay_ms",
            reason: "must not be below retry_delay_ms".to_string(),
        });
    }

    if config.client.polling_interval_ms == 0 {
        errors.push(ValidationError::Client {
            field: "polling_interval_ms",
            reason: "must be greater than zero".to_string(),
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Observability {
            field: "metrics_address",
            reason: format!("'{}' is not a socket address", observability.metrics_address),
        });
    }

    if config.darkpool.address.parse::<Address>().is_err() {
        errors.push(ValidationError::DarkpoolAddress(
            config.darkpool.address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
