//! Logging infrastructure for the JDBC harness.
//!
//! Structured logging is controlled by the `JDBC_HARNESS_DEBUG` environment variable.
//!
//! # Environment Variables
//!
//! - `JDBC_HARNESS_DEBUG=true` - Enable debug logging
//! - `JDBC_HARNESS_DEBUG=1` - Enable debug logging
//! - `JDBC_HARNESS_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `JDBC_HARNESS_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use jdbc_url::logging;
//!
//! // Initialize logging (call once at test-suite startup)
//! logging::init();
//! ```
//!
//! URLs may carry credentials, so log events record lengths, vendors and
//! offsets rather than the URL text.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "JDBC_HARNESS_DEBUG";
const LEVEL_VAR: &str = "JDBC_HARNESS_LOG_LEVEL";
const FORMAT_VAR: &str = "JDBC_HARNESS_LOG_FORMAT";

/// Check if debug logging is enabled via `JDBC_HARNESS_DEBUG`.
///
/// Returns `true` if it is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `JDBC_HARNESS_LOG_LEVEL`.
///
/// Defaults to "debug" if debug logging is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var(LEVEL_VAR) {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `JDBC_HARNESS_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var(FORMAT_VAR)
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the harness logging system.
///
/// Subsequent calls are no-ops. Nothing is installed unless
/// `JDBC_HARNESS_DEBUG` or `JDBC_HARNESS_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "jdbc_harness={},jdbc_url={},jdbc_config={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: a test binary may already have installed a subscriber.
            let installed = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(
                    level = level,
                    format = get_log_format(),
                    "JDBC harness logging initialized"
                );
            }
        }
    });
}
