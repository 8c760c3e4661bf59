//! Logging Infrastructure
//!
//! Structured logging setup with console output for development and an
//! additional rolling JSON file when a log directory is configured.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tandoor_server={level},shared={level},tower_http=info"
        ))
    })
}

/// Initialize the logger with console output only
pub fn init_logger(level: &str) {
    let _ = init_logger_with_file(level, None);
}

/// Initialize the logger with optional file output.
///
/// When `log_dir` is set, log lines go to a daily-rolled JSON file in
/// that directory instead of the console. The returned guard must stay
/// alive for the lifetime of the process; dropping it flushes and stops
/// the background writer.
///
/// `RUST_LOG` overrides the level when present.
pub fn init_logger_with_file(level: &str, log_dir: Option<&str>) -> Option<WorkerGuard> {
    if let Some(dir) = log_dir
        && std::fs::create_dir_all(dir).is_ok()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "tandoor-server");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(default_filter(level))
            .json()
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(default_filter(level))
        .init();
    None
}
