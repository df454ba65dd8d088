//! Logging setup for binaries embedding the ledger core.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that logs to stdout.
///
/// The filter is taken from the `RUST_LOG` environment variable, falling back
/// to `default_directives` (e.g. `"info"`). Does nothing if a subscriber has
/// already been installed, so it is safe to call from tests.
pub fn setup_logging(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
