//! Chain descriptor types and validation.
//!
//! The field layout follows the chain-definition JSON shape used across EVM
//! tooling (`id`, `nativeCurrency`, `rpcUrls.default.http`, ...), so a
//! descriptor can be read from or written to the same JSON/TOML documents.

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Largest number of decimals a native currency amount can be rendered with.
const MAX_DECIMALS: u8 = 77;

/// Errors produced while validating a chain descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Chain id zero is reserved.
    #[error("chain id must be non-zero")]
    ZeroChainId,

    /// The human readable name is empty.
    #[error("chain name must not be empty")]
    EmptyName,

    /// No default HTTP RPC endpoint is configured.
    #[error("chain '{0}' has no default HTTP RPC URL")]
    NoRpcUrl(String),

    /// A URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A URL uses a scheme the HTTP transport cannot speak.
    #[error("unsupported scheme '{scheme}' in URL '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    /// Native currency decimals out of range.
    #[error("native currency decimals {0} exceeds maximum of 77")]
    InvalidDecimals(u8),
}

/// Metadata of the chain's native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A set of RPC endpoints for one access tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcUrls {
    /// HTTP JSON-RPC endpoints.
    pub http: Vec<String>,

    /// WebSocket endpoints. Unused by the HTTP client but kept for fidelity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_socket: Vec<String>,
}

impl RpcUrls {
    /// Endpoints reachable over plain HTTP.
    pub fn http(urls: &[&str]) -> Self {
        Self {
            http: urls.iter().map(|u| u.to_string()).collect(),
            web_socket: Vec::new(),
        }
    }
}

/// RPC endpoints grouped by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRpcUrls {
    pub default: RpcUrls,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<RpcUrls>,
}

/// A block explorer front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockExplorer {
    pub name: String,
    pub url: String,
}

/// Block explorers known for a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockExplorers {
    pub default: BlockExplorer,
}

/// Static description of an EVM-compatible network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// EIP-155 chain id.
    pub id: u64,

    /// Human readable name.
    pub name: String,

    /// Network identifier, usually the same as the name.
    pub network: String,

    pub native_currency: NativeCurrency,

    pub rpc_urls: ChainRpcUrls,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorers: Option<BlockExplorers>,

    #[serde(default)]
    pub testnet: bool,
}

impl ChainDescriptor {
    /// Validate the descriptor and hand it back unchanged.
    pub fn define(self) -> Result<Self, ChainError> {
        self.validate()?;
        Ok(self)
    }

    /// Check that the descriptor can back an HTTP client.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.id == 0 {
            return Err(ChainError::ZeroChainId);
        }
        if self.name.trim().is_empty() {
            return Err(ChainError::EmptyName);
        }
        if self.native_currency.decimals > MAX_DECIMALS {
            return Err(ChainError::InvalidDecimals(self.native_currency.decimals));
        }
        if self.rpc_urls.default.http.is_empty() {
            return Err(ChainError::NoRpcUrl(self.name.clone()));
        }

        let public = self.rpc_urls.public.iter().flat_map(|p| p.http.iter());
        for raw in self.rpc_urls.default.http.iter().chain(public) {
            parse_http_url(raw)?;
        }
        if let Some(explorers) = &self.block_explorers {
            parse_http_url(&explorers.default.url)?;
        }
        Ok(())
    }

    /// The first default HTTP RPC endpoint.
    pub fn default_rpc_url(&self) -> Result<Url, ChainError> {
        let raw = self
            .rpc_urls
            .default
            .http
            .first()
            .ok_or_else(|| ChainError::NoRpcUrl(self.name.clone()))?;
        parse_http_url(raw)
    }

    /// Default HTTP endpoints followed by public ones, without duplicates.
    pub fn rpc_endpoints(&self) -> Result<Vec<Url>, ChainError> {
        let public = self.rpc_urls.public.iter().flat_map(|p| p.http.iter());
        let mut endpoints: Vec<Url> = Vec::new();
        for raw in self.rpc_urls.default.http.iter().chain(public) {
            let url = parse_http_url(raw)?;
            if !endpoints.contains(&url) {
                endpoints.push(url);
            }
        }
        Ok(endpoints)
    }

    /// Base URL of the default block explorer.
    pub fn explorer_url(&self) -> Option<&str> {
        self.block_explorers
            .as_ref()
            .map(|e| e.default.url.as_str())
    }

    /// Explorer page for a transaction.
    pub fn explorer_tx_url(&self, hash: TxHash) -> Option<String> {
        self.explorer_link("tx", &hash.to_string())
    }

    /// Explorer page for an account or contract.
    pub fn explorer_address_url(&self, address: Address) -> Option<String> {
        self.explorer_link("address", &address.to_string())
    }

    /// Explorer page for a block.
    pub fn explorer_block_url(&self, number: u64) -> Option<String> {
        self.explorer_link("block", &number.to_string())
    }

    /// Render a base-unit amount of the native currency, e.g. `1.5 ETH`.
    pub fn format_native(&self, amount: U256) -> String {
        let currency = &self.native_currency;
        let value = match format_units(amount, currency.decimals) {
            Ok(formatted) => trim_fraction(&formatted),
            // Out of range decimals are rejected by `validate`
            Err(_) => amount.to_string(),
        };
        format!("{} {}", value, currency.symbol)
    }

    fn explorer_link(&self, kind: &str, id: &str) -> Option<String> {
        self.explorer_url()
            .map(|base| format!("{}/{}/{}", base.trim_end_matches('/'), kind, id))
    }
}

/// Parse a URL and require an `http` or `https` scheme.
pub(crate) fn parse_http_url(raw: &str) -> Result<Url, ChainError> {
    let url = Url::parse(raw).map_err(|e| ChainError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ChainError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: other.to_string(),
        }),
    }
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::renegade_testnet;

    fn local_chain() -> ChainDescriptor {
        ChainDescriptor {
            id: 31337,
            name: "Anvil".to_string(),
            network: "anvil".to_string(),
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_urls: ChainRpcUrls {
                default: RpcUrls::http(&["http://localhost:8545"]),
                public: None,
            },
            block_explorers: None,
            testnet: true,
        }
    }

    #[test]
    fn test_define_accepts_valid_chain() {
        let chain = local_chain().define().unwrap();
        assert_eq!(chain.id, 31337);
    }

    #[test]
    fn test_define_rejects_zero_id() {
        let mut chain = local_chain();
        chain.id = 0;
        assert_eq!(chain.define().unwrap_err(), ChainError::ZeroChainId);
    }

    #[test]
    fn test_define_rejects_missing_rpc() {
        let mut chain = local_chain();
        chain.rpc_urls.default.http.clear();
        assert!(matches!(chain.define(), Err(ChainError::NoRpcUrl(_))));
    }

    #[test]
    fn test_define_rejects_websocket_scheme() {
        let mut chain = local_chain();
        chain.rpc_urls.default = RpcUrls::http(&["ws://localhost:8546"]);
        let err = chain.define().unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedScheme { ref scheme, .. } if scheme == "ws"));
    }

    #[test]
    fn test_define_rejects_bad_explorer() {
        let mut chain = local_chain();
        chain.block_explorers = Some(BlockExplorers {
            default: BlockExplorer {
                name: "Explorer".to_string(),
                url: "not a url".to_string(),
            },
        });
        assert!(matches!(chain.define(), Err(ChainError::InvalidUrl { .. })));
    }

    #[test]
    fn test_rpc_endpoints_dedup() {
        let mut chain = local_chain();
        chain.rpc_urls.public = Some(RpcUrls::http(&[
            "http://localhost:8545",
            "http://127.0.0.1:8545",
        ]));
        let endpoints = chain.rpc_endpoints().unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].as_str(), "http://localhost:8545/");
        assert_eq!(endpoints[1].as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn test_explorer_links() {
        let chain = renegade_testnet();
        assert_eq!(
            chain.explorer_block_url(42).as_deref(),
            Some("https://explorer.renegade.fi/block/42")
        );
        let address = Address::ZERO;
        assert_eq!(
            chain.explorer_address_url(address).unwrap(),
            format!("https://explorer.renegade.fi/address/{}", address)
        );
        assert!(local_chain().explorer_tx_url(TxHash::ZERO).is_none());
    }

    #[test]
    fn test_format_native() {
        let chain = local_chain();
        let one_and_half = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(chain.format_native(one_and_half), "1.5 ETH");
        assert_eq!(chain.format_native(U256::ZERO), "0 ETH");
        assert_eq!(
            chain.format_native(U256::from(2_000_000_000_000_000_000u128)),
            "2 ETH"
        );
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(renegade_testnet()).unwrap();
        assert_eq!(json["nativeCurrency"]["decimals"], 18);
        assert_eq!(json["rpcUrls"]["default"]["http"][0], "http://35.183.100.90:8547/");
        assert_eq!(json["blockExplorers"]["default"]["name"], "Explorer");
    }
}
