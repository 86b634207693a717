//! Observability for the Kanon validation engine.
//!
//! - **Logging**: `tracing-subscriber` with JSON, pretty or compact output
//! - **Metrics**: Prometheus exposition via the `metrics` facade
//!
//! The engine records into both unconditionally; without an installed
//! subscriber or recorder the calls are no-ops.
//!
//! # Example
//!
//! ```rust,ignore
//! use kanon_telemetry::{init_telemetry, LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .log_level("info,kanon_engine=debug")
//!     .log_format(LogFormat::Compact)
//!     .build();
//! init_telemetry(&config)?;
//!
//! // later, from a /metrics handler
//! let body = kanon_telemetry::render_metrics().unwrap_or_default();
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use metrics::{init_metrics, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
