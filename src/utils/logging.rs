// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up the logging framework using tracing_subscriber.
/// Reads log level filters from the `RUST_LOG` environment variable.
/// Defaults to "info" if `RUST_LOG` is not set.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")); // Default to INFO level

    // try_init so a second call (tests, embedding) does not panic
    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        tracing::debug!("Logging already initialised, keeping existing subscriber.");
        return;
    }

    tracing::debug!("Logging setup complete.");
}
