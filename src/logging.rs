use std::fmt;

use log::{debug, info, log_enabled, warn, Level};

use crate::util::hex::format_hex_compact;

/// Initializes the logger with the `env_logger` crate.
///
/// Level and filters come from `RUST_LOG`.
pub fn init_logger() {
    env_logger::init();
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}

/// Logs a payload as a spaced hex dump at debug level.
///
/// Nothing is formatted unless debug logging is enabled.
pub fn log_payload(model: impl fmt::Display, port: u8, data: &[u8]) {
    if log_enabled!(Level::Debug) {
        debug!(
            "{model} fPort {port} ({} bytes): {}",
            data.len(),
            format_hex_compact(data)
        );
    }
}
