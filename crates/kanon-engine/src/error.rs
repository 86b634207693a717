//! Ingestion error types.

use kanon_spec::SpecError;
use thiserror::Error;

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that abort an ingestion. The previous action registry is kept.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The document could not be parsed or flattened.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A configured method name is not a valid HTTP method.
    #[error("invalid HTTP method in configuration: '{0}'")]
    InvalidMethod(String),
}
