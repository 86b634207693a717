//! Configuration schema types.
//!
//! This module defines the sections below the root [`KanonConfig`](crate::KanonConfig).

use kanon_telemetry::{LogConfig, LogFormat, MetricsConfig as TelemetryMetricsConfig};
use serde::{Deserialize, Serialize};

/// Where the specification document comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SpecConfig {
    /// Path to a Swagger 2.0 document (JSON or YAML). Without it the engine
    /// starts with no actions.
    #[serde(default)]
    pub path: Option<String>,
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable log output.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g., "info" or "info,kanon_engine=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include the module path.
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Include file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's logging configuration.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            include_target: self.include_target,
            include_location: self.include_location,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Histogram bucket boundaries for validation duration, in seconds.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl MetricsConfig {
    /// Converts to the telemetry crate's metrics configuration.
    pub fn to_metrics_config(&self) -> TelemetryMetricsConfig {
        TelemetryMetricsConfig {
            enabled: self.enabled,
            duration_buckets: self.duration_buckets.clone(),
        }
    }
}

fn default_duration_buckets() -> Vec<f64> {
    TelemetryMetricsConfig::default().duration_buckets
}

fn default_true() -> bool {
    true
}
