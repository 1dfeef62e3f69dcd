//! Tracing initialization for tests and examples.

use tracing_subscriber::EnvFilter;

/// Install a test subscriber. Uses `RUST_LOG` when set, `debug` otherwise.
/// Safe to call repeatedly across tests.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
