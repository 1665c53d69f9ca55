//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Install the global tracing subscriber.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("renegade_chain={level},alloy=warn").into());

    let (pretty, compact, json) = match format {
        LogFormat::Pretty => (Some(fmt::layer().pretty()), None, None),
        LogFormat::Compact => (None, Some(fmt::layer().compact()), None),
        LogFormat::Json => (None, None, Some(fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(compact)
        .with(json)
        .try_init()
}
