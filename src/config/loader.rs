//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ChainClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the transport URL.
pub const RPC_URL_ENV_VAR: &str = "RENEGADE_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ChainClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), chain_id = config.chain.id, "Configuration loaded");
    Ok(config)
}

/// Parse, apply environment overrides and validate a TOML document.
pub fn parse_config(content: &str) -> Result<ChainClientConfig, ConfigError> {
    let mut config: ChainClientConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Defaults plus environment overrides, validated.
pub fn default_config() -> Result<ChainClientConfig, ConfigError> {
    parse_config("")
}

/// Apply overrides looked up through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ChainClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR).filter(|u| !u.trim().is_empty()) {
        tracing::info!(rpc_url = %url, "Transport URL overridden from environment");
        config.transport.url = Some(url);
    }
}
