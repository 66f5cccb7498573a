//! Logging initialization
//!
//! Console logging through `tracing` with an env-filter override
//! (`RUST_LOG=rift_scout=debug` and friends). Called once by the binary;
//! the library itself only emits events.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialize the global subscriber. Errors if a subscriber is already set.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
