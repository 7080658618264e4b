//! Tracing setup shared by the scanner binaries.
//!
//! Resolution misses are reported at `info`, successful registrations and
//! resolutions at `debug`. `verbose` lowers the default filter so the latter
//! become visible without setting `RUST_LOG`.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable overriding the directory the log files are written to.
pub const LOG_DIR_ENV: &str = "EJBMANIFEST_LOG_DIR";

/// Directory holding the rolling log files.
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ejbmanifest")
        .join("logs")
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Installs the global subscriber. The returned guard flushes the file writer
/// on drop and must be held for the lifetime of the process.
pub fn init_logging(component: &str, verbose: bool, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    // One file per component per day, e.g. scan.log.2024-01-21
    let file_appender = tracing_appender::rolling::daily(&log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .without_time();
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
