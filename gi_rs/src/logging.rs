//! Logging setup.
//!
//! Logs MUST go to stderr: stdout carries the completion-helper payload and
//! the `--gi-print-me` line.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter (`EnvFilter` syntax, e.g. `gi=debug`).
pub const LOG_ENV: &str = "GI_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. A second call is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
