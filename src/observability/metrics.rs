//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_requests_total` (counter): JSON-RPC calls by method, endpoint, outcome
//! - `rpc_request_duration_seconds` (histogram): latency per method
//! - `rpc_endpoint_health` (gauge): 1=healthy, 0=unhealthy
//! - `chain_block_number` (gauge): latest block seen by a watcher
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record the outcome and latency of one JSON-RPC call.
pub fn record_rpc_request(method: &'static str, endpoint: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "rpc_requests_total",
        "method" => method,
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("rpc_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record endpoint health.
pub fn record_endpoint_health(endpoint: &str, healthy: bool) {
    metrics::gauge!("rpc_endpoint_health", "endpoint" => endpoint.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}

/// Record the latest block number observed for a chain.
pub fn record_block_number(chain_id: u64, block: u64) {
    metrics::gauge!("chain_block_number", "chain_id" => chain_id.to_string()).set(block as f64);
}
