//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line.
    pub service_name: String,

    /// `EnvFilter` directive (trace, debug, info, warn, error, or per-target).
    pub log_level: String,

    /// Whether to emit JSON formatted logs.
    pub json_logs: bool,

    /// Whether to include the event target in each line.
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "gauge-emission".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GE_SERVICE_NAME`: Service name (default: gauge-emission)
    /// - `GE_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `GE_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `GE_LOG_TARGET`: Include targets (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("GE_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("GE_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("GE_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            with_target: lookup("GE_LOG_TARGET")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.with_target),
        }
    }
}
