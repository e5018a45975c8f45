//! Logging Infrastructure
//!
//! Structured logging setup for applications embedding the client.

use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`, overridable through `RUST_LOG`
pub fn init_logger() {
    init_logger_with_level(None, false);
}

/// Initialize the logger with a default level and optional JSON output
///
/// `RUST_LOG` takes precedence over `log_level`. Calling this twice is a
/// no-op.
pub fn init_logger_with_level(log_level: Option<&str>, json: bool) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
