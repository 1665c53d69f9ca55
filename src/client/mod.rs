//! JSON-RPC client subsystem.
//!
//! # Data Flow
//! ```text
//! ChainDescriptor + TransportConfig + ClientConfig
//!     → public.rs (one HTTP provider per endpoint)
//!     → backoff.rs (retry delays per endpoint)
//!     → read actions / watch.rs (block polling)
//! ```
//!
//! # Constraints
//! - Every RPC call is bounded by the transport timeout
//! - Construction performs no network I/O
//! - Unreachable nodes degrade to errors, never panics

pub mod backoff;
pub mod public;
pub mod types;
pub mod watch;

pub use public::PublicClient;
pub use types::{ChainId, ClientError, ClientResult};
