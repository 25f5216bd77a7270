//! Tracing subscriber setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "BUNDLEPATH_LOG";

/// Filter from `BUNDLEPATH_LOG`, or `warn` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a compact stderr subscriber filtered by [`env_filter`].
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}
