//! Tracing subscriber setup shared by the scheduler binary path and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber with structured JSON output.
///
/// Respects the `LADDER_LOG` environment variable for filtering; defaults
/// to `info`. Panics if a global subscriber is already set, so call it once
/// at process startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LADDER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();
}

/// Initialize with an explicit filter string, ignoring a subscriber that is
/// already installed. Meant for tests, where multiple cases race to init.
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init();
}
