//! Chain descriptors.
//!
//! # Data Flow
//! ```text
//! renegade.rs (built-in Renegade Testnet constants)
//!     or config file [chain] section
//!     → descriptor.rs (ChainDescriptor::define validates)
//!     → client::PublicClient (binds the descriptor to an HTTP transport)
//! ```
//!
//! A descriptor is immutable configuration. It is built once at startup and
//! shared read-only with every client created from it.

pub mod descriptor;
pub mod renegade;

pub use descriptor::{
    BlockExplorer, BlockExplorers, ChainDescriptor, ChainError, ChainRpcUrls, NativeCurrency,
    RpcUrls,
};
pub use renegade::{renegade_testnet, RENEGADE_TESTNET_CHAIN_ID};
