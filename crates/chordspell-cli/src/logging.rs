//! Logging bootstrap.
//!
//! Diagnostics go to stderr so stdout stays clean for JSON output. The logger
//! is started at most once per process; later calls with the same level are
//! no-ops and calls with a different level are rejected.

use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

/// Level used when neither `--log-level` nor `CHORDSPELL_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

/// Starts the stderr logger with `level`.
///
/// Returns a human-readable error when the level is unknown, the backend
/// cannot start, or logging already runs at another level.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_level(state, level);
    }

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        level,
        _logger: logger,
    });
    debug!(
        "event=cli_init module=cli status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    check_level(state, level)
}

/// Level the logger was started with, if any.
pub fn active_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

fn check_level(state: &LoggingState, level: &'static str) -> Result<(), String> {
    if state.level == level {
        Ok(())
    } else {
        Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ))
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("TRACE"), Ok("trace"));
        assert_eq!(normalize_level(" info "), Ok("info"));
        assert_eq!(normalize_level("warning"), Ok("warn"));
        assert_eq!(normalize_level("off"), Ok("off"));
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let err = normalize_level("loud").unwrap_err();
        assert!(err.contains("loud"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_switching() {
        init_logging(DEFAULT_LOG_LEVEL).unwrap();
        assert_eq!(active_level(), Some("warn"));
        init_logging("WARN").unwrap();
        assert!(init_logging("debug").is_err());
        assert!(init_logging("bogus").is_err());
    }
}
