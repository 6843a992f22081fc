//! Tracing subscriber setup.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (for example `"info"`).
///
/// Returns an error string if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    info!(default_directive, "Tracing initialized");
    Ok(())
}
