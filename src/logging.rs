// ==========================================
// Carga de pedidos - logging setup
// ==========================================
// tracing + tracing-subscriber, level controlled via RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG` (default: `info`), e.g.
/// `RUST_LOG=pedidos_ingest=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Initialize logging for tests. Uses the test writer so output is
/// captured per test, and tolerates repeated initialization.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
