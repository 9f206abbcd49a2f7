//! Logging infrastructure for idose.
//!
//! Centralized tracing setup shared by the CLI binary and tests.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default INFO level.
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level (debug, info, warn, error).
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
