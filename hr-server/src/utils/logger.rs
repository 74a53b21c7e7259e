//! Logging Infrastructure
//!
//! Console output (plain or JSON) plus an optional daily rolling file.

use std::path::Path;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger with console output only
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = if json.unwrap_or(false) {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    let file = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(log_path) {
            eprintln!("Failed to create log directory {dir}: {e}");
            return None;
        }
        let appender = tracing_appender::rolling::daily(log_path, "hr-server");
        Some(fmt::layer().with_ansi(false).with_writer(appender).boxed())
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
    {
        eprintln!("Logger already initialized: {e}");
    }
}
