//! Global configuration parsing and validation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{AppError, Result};

/// Telemetry ingest settings: the TCP line port and the topic strings
/// robots publish their session messages on.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TelemetryConfig {
    /// Port the newline-delimited telemetry listener binds to.
    #[serde(default = "default_telemetry_port")]
    pub port: u16,
    /// Topic robots use to signal the start of a cleaning session.
    #[serde(default = "default_topic_start")]
    pub topic_session_start: String,
    /// Topic robots use to update their position during a session.
    #[serde(default = "default_topic_update")]
    pub topic_session_update: String,
    /// Topic robots use to signal the end of a cleaning session.
    #[serde(default = "default_topic_end")]
    pub topic_session_end: String,
}

fn default_telemetry_port() -> u16 {
    1884
}

fn default_topic_start() -> String {
    "/robot/session/start".into()
}

fn default_topic_update() -> String {
    "/robot/session/update".into()
}

fn default_topic_end() -> String {
    "/robot/session/end".into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            port: default_telemetry_port(),
            topic_session_start: default_topic_start(),
            topic_session_update: default_topic_update(),
            topic_session_end: default_topic_end(),
        }
    }
}

fn default_http_port() -> u16 {
    3000
}

fn default_db_path() -> String {
    "sweepmap.db".into()
}

fn default_history_max() -> u32 {
    10
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// HTTP port for the query API.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Path to the `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Default number of sessions returned by the history endpoint.
    #[serde(default = "default_history_max")]
    pub history_max: u32,
    /// Telemetry ingest settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            db_path: default_db_path(),
            history_max: default_history_max(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_max == 0 {
            return Err(AppError::Config(
                "history_max must be greater than zero".into(),
            ));
        }
        if self.http_port == self.telemetry.port {
            return Err(AppError::Config(
                "http_port and telemetry.port must differ".into(),
            ));
        }
        for (name, topic) in [
            ("topic_session_start", &self.telemetry.topic_session_start),
            ("topic_session_update", &self.telemetry.topic_session_update),
            ("topic_session_end", &self.telemetry.topic_session_end),
        ] {
            if topic.is_empty() || topic.contains(' ') {
                return Err(AppError::Config(format!(
                    "{name} must be non-empty and contain no spaces"
                )));
            }
        }
        Ok(())
    }
}
