//! Diagnostic logging to standard error, filtered through `WALLET_LOG`.

use crate::constants;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Defaults to warnings only so that normal
/// runs leave standard error to the remote command.
pub fn init() {
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
