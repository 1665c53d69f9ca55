//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → block watchers exit their polling loops
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
