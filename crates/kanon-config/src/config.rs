//! Main configuration types.
//!
//! This module provides the top-level [`KanonConfig`] struct.

use kanon_engine::{EngineConfig, UnresolvedPolicy};
use kanon_telemetry::{logging::create_env_filter, LogFormat, TelemetryConfig};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoggingConfig, MetricsConfig, SpecConfig, TelemetrySection};

/// Complete Kanon configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use kanon_config::KanonConfig;
///
/// let config = KanonConfig::default();
/// assert_eq!(config.engine.methods, vec!["GET", "POST", "DELETE"]);
/// assert!(config.spec.path.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct KanonConfig {
    /// Engine behavior.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Specification source.
    #[serde(default)]
    pub spec: SpecConfig,

    /// Logging and metrics.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl KanonConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `engine.methods` is empty or names an invalid method
    /// - `spec.path` is set but blank
    /// - `telemetry.logging.level` is not a valid filter directive
    /// - `telemetry.metrics.duration_buckets` is empty, not finite or not increasing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.methods.is_empty() {
            return Err(ConfigError::invalid_value(
                "engine.methods",
                "must list at least one method",
            ));
        }
        self.engine
            .parsed_methods()
            .map_err(|e| ConfigError::invalid_value("engine.methods", e.to_string()))?;

        if self.spec.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid_value("spec.path", "must not be blank"));
        }

        let logging = &self.telemetry.logging;
        if logging.enabled {
            create_env_filter(&logging.level).map_err(|e| {
                ConfigError::invalid_value("telemetry.logging.level", e.to_string())
            })?;
        }

        let metrics = &self.telemetry.metrics;
        if metrics.enabled {
            let buckets = &metrics.duration_buckets;
            if buckets.is_empty() {
                return Err(ConfigError::invalid_value(
                    "telemetry.metrics.duration_buckets",
                    "must not be empty",
                ));
            }
            if buckets.iter().any(|b| !b.is_finite())
                || buckets.windows(2).any(|pair| pair[0] >= pair[1])
            {
                return Err(ConfigError::invalid_value(
                    "telemetry.metrics.duration_buckets",
                    "must be finite and strictly increasing",
                ));
            }
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations, no
    /// metrics recorder, unresolved parameters skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use kanon_config::KanonConfig;
    ///
    /// let config = KanonConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// assert!(!config.telemetry.metrics.enabled);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            engine: EngineConfig::default(),
            spec: SpecConfig::default(),
            telemetry: TelemetrySection {
                logging: LoggingConfig {
                    level: "debug".to_string(),
                    format: LogFormat::Pretty,
                    include_location: true,
                    ..LoggingConfig::default()
                },
                metrics: MetricsConfig {
                    enabled: false,
                    ..MetricsConfig::default()
                },
            },
        }
    }

    /// Production preset: JSON info logs, metrics on, unresolved
    /// parameters rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use kanon_config::KanonConfig;
    /// use kanon_engine::UnresolvedPolicy;
    ///
    /// let config = KanonConfig::production();
    /// assert_eq!(config.engine.unresolved, UnresolvedPolicy::Reject);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        Self {
            engine: EngineConfig {
                unresolved: UnresolvedPolicy::Reject,
                ..EngineConfig::default()
            },
            spec: SpecConfig::default(),
            telemetry: TelemetrySection::default(),
        }
    }

    /// Telemetry settings in the form `kanon-telemetry` consumes.
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::builder()
            .logging(self.telemetry.logging.to_log_config())
            .metrics(self.telemetry.metrics.to_metrics_config())
            .build()
    }
}
