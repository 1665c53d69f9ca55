//! Read-only JSON-RPC client bound to a chain descriptor.
//!
//! # Responsibilities
//! - Connect to the chain's HTTP JSON-RPC endpoints
//! - Query chain state (chain id, block number, balances, receipts, logs)
//! - Retry with backoff, bound every call with a timeout, fail over between endpoints
//! - Provide a health check for chain connectivity

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::{Filter, Log, TransactionReceipt};
use alloy::transports::{RpcError, TransportResult};
use tokio::time::{sleep, timeout};
use url::Url;

use crate::chain::descriptor::parse_http_url;
use crate::chain::ChainDescriptor;
use crate::client::backoff::RetryPolicy;
use crate::client::types::{
    ChainId, ClientConfig, ClientError, ClientResult, TransportConfig,
};
use crate::observability::metrics;

type SharedProvider = Arc<dyn Provider + Send + Sync>;

/// One HTTP endpoint and the provider speaking to it.
#[derive(Clone)]
struct Endpoint {
    url: Url,
    provider: SharedProvider,
}

/// Public (read-only) client for one chain.
#[derive(Clone)]
pub struct PublicClient {
    /// Chain the client is bound to.
    chain: Arc<ChainDescriptor>,
    /// Primary endpoint first, then failovers.
    endpoints: Arc<[Endpoint]>,
    /// Per-attempt timeout.
    timeout_duration: Duration,
    retry: RetryPolicy,
    polling_interval: Duration,
    cache_time: Duration,
}

impl PublicClient {
    /// Create a client without touching the network.
    ///
    /// Without a transport URL the chain's default and public RPC URLs are
    /// used. Failover URLs equal to an earlier endpoint are skipped. A zero
    /// polling interval or timeout is rejected.
    pub fn new(
        chain: ChainDescriptor,
        transport: &TransportConfig,
        client: &ClientConfig,
    ) -> ClientResult<Self> {
        let chain = chain.define()?;
        if client.polling_interval_ms == 0 {
            return Err(ClientError::InvalidConfig {
                field: "polling_interval_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if transport.timeout_ms == 0 {
            return Err(ClientError::InvalidConfig {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        let polling_interval = Duration::from_millis(client.polling_interval_ms);

        let mut urls = match &transport.url {
            Some(raw) => vec![parse_transport_url(raw)?],
            None => chain.rpc_endpoints()?,
        };
        for raw in &transport.failover_urls {
            let url = parse_transport_url(raw)?;
            if !urls.contains(&url) {
                urls.push(url);
            }
        }

        let endpoints: Vec<Endpoint> = urls
            .into_iter()
            .map(|url| {
                let rpc = RpcClient::new_http(url.clone()).with_poll_interval(polling_interval);
                let provider = Arc::new(ProviderBuilder::new().connect_client(rpc)) as SharedProvider;
                Endpoint { url, provider }
            })
            .collect();

        tracing::debug!(
            chain_id = chain.id,
            chain = %chain.name,
            endpoints = endpoints.len(),
            "Public client created"
        );

        Ok(Self {
            chain: Arc::new(chain),
            endpoints: endpoints.into(),
            timeout_duration: Duration::from_millis(transport.timeout_ms),
            retry: RetryPolicy {
                retry_count: transport.retry_count,
                base_ms: transport.retry_delay_ms,
                max_ms: transport.max_retry_delay_ms,
            },
            polling_interval,
            cache_time: Duration::from_millis(client.cache_time_ms()),
        })
    }

    /// Create a client with default transport and client settings.
    pub fn with_defaults(chain: ChainDescriptor) -> ClientResult<Self> {
        Self::new(chain, &TransportConfig::default(), &ClientConfig::default())
    }

    /// Create a client and verify the node serves the expected chain.
    ///
    /// A failed verification is logged and does not fail construction.
    pub async fn connect(
        chain: ChainDescriptor,
        transport: &TransportConfig,
        client: &ClientConfig,
    ) -> ClientResult<Self> {
        let client = Self::new(chain, transport, client)?;

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %client.endpoints[0].url,
                    chain_id = client.chain.id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches the descriptor.
    pub async fn verify_chain_id(&self) -> ClientResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.chain.id {
            return Err(ClientError::ChainMismatch {
                expected: self.chain.id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ClientResult<ChainId> {
        self.request("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ClientResult<u64> {
        self.request("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> ClientResult<U256> {
        self.request("eth_getBalance", move |p| async move {
            p.get_balance(address).await
        })
        .await
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> ClientResult<u64> {
        self.request("eth_getTransactionCount", move |p| async move {
            p.get_transaction_count(address).await
        })
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ClientResult<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", move |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> ClientResult<u128> {
        self.request("eth_gasPrice", |p| async move { p.get_gas_price().await })
            .await
    }

    /// Get the deployed bytecode at an address.
    pub async fn get_code(&self, address: Address) -> ClientResult<Bytes> {
        self.request("eth_getCode", move |p| async move {
            p.get_code_at(address).await
        })
        .await
    }

    /// Get logs matching a filter.
    pub async fn get_logs(&self, filter: &Filter) -> ClientResult<Vec<Log>> {
        self.request("eth_getLogs", |p| {
            let filter = filter.clone();
            async move { p.get_logs(&filter).await }
        })
        .await
    }

    /// Check if the chain is reachable and healthy.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        self.check_health().await.is_some()
    }

    /// Fetch the block number and report which endpoint answered.
    ///
    /// Endpoints tried before the one that answered are recorded unhealthy.
    /// When none answers, all of them are.
    pub async fn check_health(&self) -> Option<&Url> {
        let answered = self
            .request_on("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
            .ok()
            .map(|(_, idx)| idx);

        let tried = answered.map_or(self.endpoints.len(), |idx| idx + 1);
        for (idx, endpoint) in self.endpoints.iter().take(tried).enumerate() {
            metrics::record_endpoint_health(endpoint.url.as_str(), Some(idx) == answered);
        }
        answered.map(|idx| &self.endpoints[idx].url)
    }

    /// The chain this client is bound to.
    pub fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    /// Endpoint URLs in the order they are tried.
    pub fn endpoints(&self) -> Vec<&Url> {
        self.endpoints.iter().map(|e| &e.url).collect()
    }

    /// Interval between polls for watch actions.
    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// How long cached responses stay valid.
    pub fn cache_time(&self) -> Duration {
        self.cache_time
    }

    /// Get the underlying primary provider.
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.endpoints[0].provider.as_ref()
    }

    /// Run `call` against each endpoint in turn, retrying per the policy.
    ///
    /// A JSON-RPC error object from the node is returned as-is; only transport
    /// failures and timeouts are retried or failed over.
    async fn request<T, F, Fut>(&self, method: &'static str, call: F) -> ClientResult<T>
    where
        F: Fn(SharedProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        self.request_on(method, call).await.map(|(result, _)| result)
    }

    /// Like `request`, also returning the index of the endpoint that answered.
    async fn request_on<T, F, Fut>(
        &self,
        method: &'static str,
        call: F,
    ) -> ClientResult<(T, usize)>
    where
        F: Fn(SharedProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let mut attempts = 0u32;
        let mut timeouts = 0u32;
        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            let url = endpoint.url.as_str();
            for attempt in 0..self.retry.attempts() {
                if attempt > 0 {
                    sleep(self.retry.delay(attempt)).await;
                }
                attempts += 1;

                let start = Instant::now();
                match timeout(self.timeout_duration, call(endpoint.provider.clone())).await {
                    Ok(Ok(result)) => {
                        metrics::record_rpc_request(method, url, "ok", start);
                        return Ok((result, idx));
                    }
                    Ok(Err(RpcError::ErrorResp(payload))) => {
                        metrics::record_rpc_request(method, url, "error_response", start);
                        return Err(ClientError::Rpc {
                            method,
                            code: payload.code,
                            message: payload.message.to_string(),
                        });
                    }
                    Ok(Err(e)) => {
                        metrics::record_rpc_request(method, url, "error", start);
                        tracing::warn!(provider_idx = idx, attempt, method, error = %e, "RPC error");
                    }
                    Err(_) => {
                        timeouts += 1;
                        metrics::record_rpc_request(method, url, "timeout", start);
                        tracing::warn!(provider_idx = idx, attempt, method, "RPC timeout");
                    }
                }
            }
            if idx + 1 < self.endpoints.len() {
                tracing::warn!(provider_idx = idx, method, "Endpoint exhausted, trying next provider");
            }
        }
        if timeouts == attempts {
            return Err(ClientError::Timeout {
                method,
                timeout_ms: self.timeout_duration.as_millis() as u64,
                attempts,
            });
        }
        Err(ClientError::AllEndpointsFailed { method, attempts })
    }
}

fn parse_transport_url(raw: &str) -> ClientResult<Url> {
    parse_http_url(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

impl std::fmt::Debug for PublicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicClient")
            .field("chain_id", &self.chain.id)
            .field("chain", &self.chain.name)
            .field("endpoints", &self.endpoints())
            .field("timeout", &self.timeout_duration)
            .field("polling_interval", &self.polling_interval)
            .finish()
    }
}
