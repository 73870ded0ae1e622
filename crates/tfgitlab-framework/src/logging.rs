//! Logging setup for provider processes
//!
//! stdout belongs to the host protocol, so logs always go to stderr.

use crate::error::{FrameworkError, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. "debug" or
/// "tfgitlab_client=trace")
pub const LOG_ENV: &str = "TF_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber, ignoring an already installed one
pub fn init_logging() {
    if let Err(err) = try_init_logging() {
        tracing::debug!("{}", err);
    }
}

/// Install the global subscriber with an explicit fallback filter
pub fn init_logging_with_default(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| FrameworkError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| FrameworkError::Logging(e.to_string()))
}

/// Install the global subscriber; fails if one is already set
pub fn try_init_logging() -> Result<()> {
    init_logging_with_default(DEFAULT_DIRECTIVE)
}
