//! Prometheus metrics.
//!
//! The engine records through the `metrics` facade; [`init_metrics`] installs
//! a Prometheus recorder and [`render_metrics`] produces the exposition text
//! for whatever endpoint the host serves.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `kanon_validations_total` | Counter | `action`, `result` |
//! | `kanon_validation_failures_total` | Counter | `kind` |
//! | `kanon_validation_duration_seconds` | Histogram | `action` |
//! | `kanon_unresolved_parameters_total` | Counter | `type` |
//! | `kanon_ingestions_total` | Counter | `result` |

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::error::TelemetryError;
use crate::TelemetryResult;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metric name constants.
pub mod names {
    /// Validation calls by action and result.
    pub const VALIDATIONS_TOTAL: &str = "kanon_validations_total";
    /// Failed validations by error kind.
    pub const VALIDATION_FAILURES_TOTAL: &str = "kanon_validation_failures_total";
    /// Validation latency.
    pub const VALIDATION_DURATION_SECONDS: &str = "kanon_validation_duration_seconds";
    /// Parameters skipped or rejected for lack of a validator.
    pub const UNRESOLVED_PARAMETERS_TOTAL: &str = "kanon_unresolved_parameters_total";
    /// Specification ingestions by result.
    pub const INGESTIONS_TOTAL: &str = "kanon_ingestions_total";
}

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether to install the Prometheus recorder.
    pub enabled: bool,

    /// Histogram buckets, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 10µs .. 100ms: a validation call is a handful of map lookups
            duration_buckets: vec![
                0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1,
            ],
        }
    }
}

/// Installs the Prometheus recorder. Calling it again is a no-op.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if the buckets are empty or another
/// recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets(&config.duration_buckets)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);
    describe_metrics();

    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn describe_metrics() {
    describe_counter!(names::VALIDATIONS_TOTAL, "Validation calls by action and result");
    describe_counter!(
        names::VALIDATION_FAILURES_TOTAL,
        "Failed validations by error kind"
    );
    describe_histogram!(
        names::VALIDATION_DURATION_SECONDS,
        "Validation call duration in seconds"
    );
    describe_counter!(
        names::UNRESOLVED_PARAMETERS_TOTAL,
        "Parameters with no resolvable validator, by declared type"
    );
    describe_counter!(names::INGESTIONS_TOTAL, "Specification ingestions by result");
}

/// Records a completed validation call.
///
/// `result` is `"accepted"` or `"rejected"`.
pub fn record_validation(action: &str, result: &'static str, duration: Duration) {
    counter!(
        names::VALIDATIONS_TOTAL,
        "action" => action.to_string(),
        "result" => result
    )
    .increment(1);

    histogram!(
        names::VALIDATION_DURATION_SECONDS,
        "action" => action.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Records a rejection by its error kind tag.
pub fn record_failure(kind: &str) {
    counter!(names::VALIDATION_FAILURES_TOTAL, "kind" => kind.to_string()).increment(1);
}

/// Records a parameter whose declared type has no validator.
pub fn record_unresolved(type_name: &str) {
    counter!(
        names::UNRESOLVED_PARAMETERS_TOTAL,
        "type" => type_name.to_string()
    )
    .increment(1);
}

/// Records a specification ingestion.
pub fn record_ingestion(success: bool) {
    let result = if success { "success" } else { "error" };
    counter!(names::INGESTIONS_TOTAL, "result" => result).increment(1);
}
