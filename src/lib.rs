//! Renegade Testnet chain definition and read-only JSON-RPC client.

pub mod chain;
pub mod client;
pub mod config;
pub mod darkpool;
pub mod lifecycle;
pub mod observability;

pub use chain::{renegade_testnet, ChainDescriptor};
pub use client::PublicClient;
pub use config::ChainClientConfig;
pub use lifecycle::Shutdown;
