//! Engine configuration.

use kanon_core::Method;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, IngestResult};

/// How path templates are rewritten into action identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Keep `/item/{id}` as written.
    #[default]
    Template,
    /// Rewrite `/item/{id}` to `/item/:id`.
    Colon,
}

/// What happens to a parameter whose type resolves to no validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Log a warning, count it, list it in `Accepted::skipped` and move on.
    #[default]
    Skip,
    /// Reject the action with `ErrorKind::NoValidator`.
    Reject,
}

/// Engine configuration.
///
/// # Example
///
/// ```
/// use kanon_engine::{EngineConfig, PathStyle, UnresolvedPolicy};
///
/// let config = EngineConfig::strict().with_path_style(PathStyle::Colon);
/// assert_eq!(config.unresolved, UnresolvedPolicy::Reject);
/// assert_eq!(config.methods, vec!["GET", "POST", "DELETE"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// HTTP methods whose operations become actions.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    /// Path key rewriting.
    #[serde(default)]
    pub path_style: PathStyle,

    /// Handling of parameters with no validator.
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            methods: default_methods(),
            path_style: PathStyle::default(),
            unresolved: UnresolvedPolicy::default(),
        }
    }
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "DELETE".to_string()]
}

impl EngineConfig {
    /// Default configuration with unresolved parameters rejected.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Reject,
            ..Self::default()
        }
    }

    /// Sets the path style.
    #[must_use]
    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Sets the methods to ingest.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Parses the configured method names, uppercased.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidMethod` for a name that is not a valid
    /// HTTP method token.
    pub fn parsed_methods(&self) -> IngestResult<Vec<Method>> {
        self.methods
            .iter()
            .map(|name| {
                Method::from_bytes(name.trim().to_ascii_uppercase().as_bytes())
                    .map_err(|_| IngestError::InvalidMethod(name.clone()))
            })
            .collect()
    }
}
