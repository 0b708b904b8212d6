//! Integration test suite.

use std::sync::Once;

mod concurrency;
mod monitor;
mod solver;

static TRACING: Once = Once::new();

/// Installs a subscriber routing tracing output through the test harness
/// capture. Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}
