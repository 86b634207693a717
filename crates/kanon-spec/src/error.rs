//! Spec parsing error types.

use thiserror::Error;

/// Result type for spec parsing.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while parsing a specification document.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The input was empty or whitespace.
    #[error("specification document is empty")]
    Empty,

    /// The document is not valid JSON.
    #[error("failed to parse specification JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("failed to parse specification YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document declares a version this parser does not understand.
    #[error("unsupported specification version: {0}")]
    UnsupportedVersion(String),

    /// A `$ref` does not point at a known parameter definition.
    #[error("unresolved parameter reference '{reference}' in {path}")]
    UnresolvedReference {
        /// The reference string.
        reference: String,
        /// Path template whose operation used it.
        path: String,
    },
}

impl SpecError {
    /// Create an unresolved reference error.
    pub fn unresolved(reference: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_display() {
        let err = SpecError::unresolved("#/parameters/page", "/users");
        assert!(err.to_string().contains("#/parameters/page"));
        assert!(err.to_string().contains("/users"));
    }

    #[test]
    fn test_version_display() {
        let err = SpecError::UnsupportedVersion("3.0.3".to_string());
        assert_eq!(err.to_string(), "unsupported specification version: 3.0.3");
    }
}
