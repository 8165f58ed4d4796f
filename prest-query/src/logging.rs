//! Logging setup for Prest.
//!
//! Library code logs through `tracing`. Installing a subscriber is left to
//! the application, or to [`init`] when the `tracing-subscriber` feature is
//! enabled.
//!
//! # Environment Variables
//!
//! - `PREST_DEBUG=true|1|yes` - Enable debug logging
//! - `PREST_LOG_LEVEL=trace|debug|info|warn|error` - Set the level explicitly
//! - `PREST_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use prest_query::logging;
//!
//! // Call once at startup.
//! logging::init();
//! ```
//!
//! Per-request diagnostics are separate: `.debug()` on a builder logs that
//! request at `debug` level and its failed responses at `warn` level,
//! whatever `PREST_DEBUG` says.

use std::env;
use std::fmt;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "PREST_DEBUG";
const LEVEL_VAR: &str = "PREST_LOG_LEVEL";
const FORMAT_VAR: &str = "PREST_LOG_FORMAT";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human readable.
    Pretty,
    /// Single-line, human readable.
    Compact,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to JSON.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "compact" => Self::Compact,
            _ => Self::Json,
        }
    }

    /// Format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Resolve a level name, falling back to `debug` in debug mode and `warn`
/// otherwise.
fn resolve_level(requested: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match requested.map(str::to_ascii_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

/// Whether `PREST_DEBUG` enables debug logging.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).map(|v| is_truthy(&v)).unwrap_or(false)
}

/// The level from `PREST_LOG_LEVEL`, or the debug-mode default.
pub fn get_log_level() -> &'static str {
    let requested = env::var(LEVEL_VAR).ok();
    resolve_level(requested.as_deref(), is_debug_enabled())
}

/// The format from `PREST_LOG_FORMAT`.
pub fn get_log_format() -> LogFormat {
    env::var(FORMAT_VAR)
        .map(|f| LogFormat::parse(&f))
        .unwrap_or_default()
}

/// Install a global subscriber according to the environment.
///
/// Does nothing unless `PREST_DEBUG` or `PREST_LOG_LEVEL` is set, or
/// without the `tracing-subscriber` feature. Only the first call has an
/// effect.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let format = get_log_format();
            let filter = EnvFilter::try_new(format!(
                "prest={level},prest_query={level},prest_reqwest={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match format {
                LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
                LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
                LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = %format, "Prest logging initialized");
            }
        }
    });
}

/// Set `PREST_LOG_LEVEL` and call [`init`].
///
/// # Safety
///
/// Modifies the process environment. Call it at startup, before other
/// threads are spawned.
pub fn init_with_level(level: &str) {
    // SAFETY: documented as startup-only.
    unsafe {
        env::set_var(LEVEL_VAR, level);
    }
    init();
}

/// Set `PREST_DEBUG=true` and call [`init`].
///
/// # Safety
///
/// Same constraint as [`init_with_level`].
pub fn init_debug() {
    // SAFETY: documented as startup-only.
    unsafe {
        env::set_var(DEBUG_VAR, "true");
    }
    init();
}

/// Debug-level log line emitted only when `PREST_DEBUG` is on.
#[macro_export]
macro_rules! prest_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            ::tracing::debug!($($arg)*);
        }
    };
}
