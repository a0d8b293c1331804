//! Logging infrastructure for the parking model
//!
//! Structured logging goes through the `tracing` crate. Library code only
//! emits events; installing a subscriber is left to the binary (or a test)
//! through [`init_logging`].
//!
//! # Usage
//!
//! ```rust
//! use parkway::core::logging::init_logging;
//!
//! // Defaults: info level, compact format
//! let _ = init_logging(None, None);
//!
//! // Explicit settings
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Environment Variables
//!
//! - `PARKWAY_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `PARKWAY_LOG_FORMAT`: output format (compact|pretty|json)
//! - `RUST_LOG`: fallback filter when `PARKWAY_LOG_LEVEL` is unset
//!
//! # Filtering Logs
//!
//! ```bash
//! # Only the route search, at trace level
//! RUST_LOG="parkway::lot::graph=trace" parkway route --from E1 --to P9
//!
//! # Everything at info, index mutations at debug
//! RUST_LOG="info,parkway::lot::index=debug" parkway run --input session.txt
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "PARKWAY_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "PARKWAY_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolved logging settings, before a subscriber is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive handed to `EnvFilter`
    pub directive: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Resolve settings from explicit values, falling back to the environment
    ///
    /// Level: argument, then `PARKWAY_LOG_LEVEL`, then `RUST_LOG`, then `info`.
    /// Format: argument, then `PARKWAY_LOG_FORMAT`, then `compact`.
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let directive = level
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let format = match format
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        {
            Some(name) => {
                LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e))?
            }
            None => LogFormat::default(),
        };

        Ok(Self { directive, format })
    }

    fn filter(&self) -> EnvFilter {
        if self.directive == "off" {
            return EnvFilter::new("off");
        }
        EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Install a global subscriber with these settings
    ///
    /// Events are written to stderr so they never mix with command output.
    pub fn install(&self) -> Result<(), Box<dyn std::error::Error>> {
        let registry = Registry::default().with(self.filter());
        match self.format {
            LogFormat::Compact => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .json(),
                )
                .try_init()?,
        }
        Ok(())
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// Returns an error for an unknown format, or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    LogSettings::resolve(level, format)?.install()
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_explicit_settings_win() {
        let settings = LogSettings::resolve(Some("debug"), Some("pretty")).unwrap();
        assert_eq!(settings.directive, "debug");
        assert_eq!(settings.format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = LogSettings::resolve(Some("info"), Some("yaml")).unwrap_err();
        assert!(err.contains("yaml"));
    }
}
