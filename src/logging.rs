//! Logging initialization.
//!
//! Installs a global `tracing` subscriber driven by the crate's `[logging]`
//! settings. Embedders that already run their own subscriber should skip
//! this module and configure logging themselves.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Install a global subscriber from logging settings.
///
/// Logs go to stderr in either pretty or JSON form per `logging.format`.
/// The RUST_LOG environment variable overrides `logging.level` when set.
pub fn init_from_config(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
