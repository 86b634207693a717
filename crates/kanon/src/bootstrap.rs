use std::fs;
use std::path::PathBuf;

use kanon_config::{ConfigError, KanonConfig};
use kanon_engine::{Engine, IngestError};
use kanon_telemetry::{init_telemetry, TelemetryError};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while starting Kanon from configuration.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging or metrics could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// The specification file could not be read.
    #[error("failed to read specification {path}")]
    ReadSpec {
        /// Configured path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The specification could not be ingested.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Validates `config`, installs logging and metrics, and builds an engine.
///
/// # Errors
///
/// Returns `BootstrapError` if any step fails. Installing logging twice in
/// one process fails; use [`build_engine`] when telemetry is already set up.
pub fn bootstrap(config: &KanonConfig) -> Result<Engine, BootstrapError> {
    config.validate()?;
    init_telemetry(&config.telemetry_config())?;
    build_engine(config)
}

/// Builds an engine from `config`, ingesting `spec.path` when set.
///
/// # Errors
///
/// Returns `BootstrapError::ReadSpec` or `BootstrapError::Ingest`.
pub fn build_engine(config: &KanonConfig) -> Result<Engine, BootstrapError> {
    let mut engine = Engine::with_config(config.engine.clone());

    if let Some(path) = &config.spec.path {
        let bytes = fs::read(path).map_err(|source| BootstrapError::ReadSpec {
            path: PathBuf::from(path),
            source,
        })?;
        engine.ingest(&bytes)?;
        info!(path = %path, actions = engine.actions().count(), "engine ready");
    } else {
        info!("engine ready without a specification");
    }

    Ok(engine)
}
