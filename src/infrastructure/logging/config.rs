//! Logging settings resolved from the application config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::models::LoggingConfig;

/// Logging configuration resolved from the application config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format on stderr
    pub format: LogFormat,

    /// Directory for log files (stderr only when None)
    pub log_dir: Option<PathBuf>,

    /// Log rotation policy for files
    pub rotation: RotationPolicy,
}

/// Output format for the stderr layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Pretty,
}

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day.
    #[default]
    Daily,
    /// New file every hour.
    Hourly,
    /// Single file.
    Never,
}

impl LogFormat {
    /// Unknown values fall back to pretty output.
    pub fn parse(format: &str) -> Self {
        if format.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

impl RotationPolicy {
    /// Parse a rotation name; unknown values mean daily.
    pub fn parse(rotation: &str) -> Self {
        match rotation.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_settings(&LoggingConfig::default(), false)
    }
}

impl LogConfig {
    /// Build from the `logging` section; `debug` raises the level to at least debug.
    pub fn from_settings(settings: &LoggingConfig, debug: bool) -> Self {
        let level = if debug && !settings.level.eq_ignore_ascii_case("trace") {
            "debug".to_string()
        } else {
            settings.level.clone()
        };

        Self {
            level,
            format: LogFormat::parse(&settings.format),
            log_dir: settings.log_dir.clone(),
            rotation: RotationPolicy::parse(&settings.rotation),
        }
    }
}
