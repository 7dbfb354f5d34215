//! Configuration types

use reqlog_middleware::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Request logger settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Diagnostic output of the process itself
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directive, e.g. `info` or `reqlog=debug`
    pub level: String,

    /// Log format (json, text)
    pub format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
