// src/logging.rs

use crate::errors::{ContentError, ContentResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::PathBuf;

/// Directory the log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("drcontent")
        .join("logs")
}

/// Starts file logging. `RUST_LOG` takes precedence over `level`.
/// The terminal belongs to the TUI, so nothing is written to stderr.
pub fn init_logging(level: &str) -> ContentResult<LoggerHandle> {
    Logger::try_with_env_or_str(level)
        .map_err(|e| ContentError::config_error(format!("Invalid log level '{}': {}", level, e)))?
        .log_to_file(FileSpec::default().directory(log_dir()).basename("drcontent"))
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| ContentError::config_error(format!("Failed to start logger: {}", e)))
}

/// Records one remote call in the log.
pub fn log_api_call(log: &ApiCallLog) {
    log::info!(
        target: "api_calls",
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );
}
