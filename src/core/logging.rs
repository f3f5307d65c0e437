//! Logging init for hosts that embed the installer.
//!
//! The plugin itself only emits `tracing` events; a host that has no
//! subscriber of its own can call [`init_logging`] once at startup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable carrying the filter directives
pub const LOG_ENV_VARIABLE: &str = "WPMDB_INSTALLER_LOG";

/// Build the filter from `WPMDB_INSTALLER_LOG`, or `default_directive` when unset/invalid.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VARIABLE).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install a stderr fmt subscriber.
/// Returns Err if a global subscriber is already set.
pub fn init_logging(default_directive: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
