//! Tracing setup for the daren CLI
//!
//! Usage:
//!   daren --debug serve              # Debug logging to console
//!   RUST_LOG=daren_server=debug daren serve
//!
//! Filter precedence: RUST_LOG, then --debug, then `log_level` from the
//! config (or DAREN_LOG), then "info".

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used if RUST_LOG is not set)
    pub debug: bool,
    /// Fallback filter from config
    pub default_level: Option<String>,
}

impl TracingConfig {
    fn fallback_filter(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.default_level.as_deref().unwrap_or("info")
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
