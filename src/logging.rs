// src/logging.rs
// =============================================================================
// Installs the global tracing subscriber.
//
// RUST_LOG wins when it is set; otherwise the --log-level value is used.
// Output is human-readable by default, or one JSON object per line.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Sets up logging for the whole process. Call once, early in `main`.
pub fn init(level: &str, json: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

fn filter_for(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{}'", level))
}
