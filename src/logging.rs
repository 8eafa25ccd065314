//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily-rotating file in the platform data directory rather
//! than stdout, so log output never corrupts the TUI.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "tix=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender and log level
/// configuration via the `RUST_LOG` environment variable
/// (e.g. `RUST_LOG=tix=debug`).
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the tracing
/// subscriber cannot be installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "tix.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tix starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("tix").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("tix shutting down");
}
