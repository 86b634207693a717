//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use kanon_engine::{PathStyle, UnresolvedPolicy};
use kanon_telemetry::LogFormat;

use crate::{ConfigError, KanonConfig};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables, `PREFIX__SECTION__KEY`
///
/// # Example
///
/// ```no_run
/// use kanon_config::ConfigLoader;
///
/// # fn main() -> Result<(), kanon_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("kanon.toml")?
///     .with_env_prefix("KANON")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: KanonConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: KanonConfig::default(),
            env_prefix: None,
        }
    }

    /// Start from the development preset.
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = KanonConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = KanonConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`. The file
    /// replaces the current layer; sections it omits take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, has an
    /// unsupported extension or does not parse.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        self.config = parse(&content, &extension)
            .map_err(|e| match e {
                ConfigError::UnsupportedFormat(_) => {
                    ConfigError::UnsupportedFormat(path.display().to_string())
                }
                other => other,
            })?;

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `format` (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the format is unsupported or the content
    /// does not parse.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, &format.to_lowercase())?;
        Ok(self)
    }

    /// Apply environment overrides named `PREFIX__SECTION__KEY` at load time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if one exists.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        let _ = dotenvy::dotenv();
        self
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override does not parse or the result
    /// fails validation.
    pub fn load(mut self) -> Result<KanonConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Return the configuration without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> KanonConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> =
            env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["ENGINE", "METHODS"] => {
                self.config.engine.methods = value
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_uppercase)
                    .collect();
            }
            ["ENGINE", "PATH_STYLE"] => {
                self.config.engine.path_style = match value.to_lowercase().as_str() {
                    "template" => PathStyle::Template,
                    "colon" => PathStyle::Colon,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'template' or 'colon'",
                        ))
                    }
                };
            }
            ["ENGINE", "UNRESOLVED"] => {
                self.config.engine.unresolved = match value.to_lowercase().as_str() {
                    "skip" => UnresolvedPolicy::Skip,
                    "reject" => UnresolvedPolicy::Reject,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'skip' or 'reject'",
                        ))
                    }
                };
            }

            ["SPEC", "PATH"] => {
                self.config.spec.path = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }

            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                self.config.telemetry.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => {
                self.config.telemetry.logging.level = value.to_string();
            }
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                self.config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    "compact" => LogFormat::Compact,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json', 'pretty' or 'compact'",
                        ))
                    }
                };
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_TARGET"] => {
                self.config.telemetry.logging.include_target = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                self.config.telemetry.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            ["TELEMETRY", "METRICS", "ENABLED"] => {
                self.config.telemetry.metrics.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "METRICS", "DURATION_BUCKETS"] => {
                self.config.telemetry.metrics.duration_buckets = value
                    .split(',')
                    .map(|b| b.trim().parse::<f64>())
                    .collect::<Result<Vec<f64>, _>>()
                    .map_err(|_| {
                        ConfigError::env_parse_error(key, "expected comma-separated floats")
                    })?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<KanonConfig, ConfigError> {
    match format {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, KanonConfig::default());
    }

    #[test]
    fn test_loader_presets() {
        let dev = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(dev.telemetry.logging.level, "debug");

        let prod = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(prod.engine.unresolved, UnresolvedPolicy::Reject);
    }

    #[test]
    fn test_loader_with_string_toml() {
        let config = ConfigLoader::new()
            .with_string("[engine]\nunresolved = \"reject\"\n", "TOML")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.engine.unresolved, UnresolvedPolicy::Reject);
    }

    #[test]
    fn test_loader_with_string_json() {
        let config = ConfigLoader::new()
            .with_string(r#"{"spec": {"path": "api.yaml"}}"#, "json")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.spec.path.as_deref(), Some("api.yaml"));
    }

    #[test]
    fn test_loader_with_string_unsupported() {
        let result = ConfigLoader::new().with_string("a: 1", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(f)) if f == "yaml"));
    }

    #[test]
    fn test_loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[engine]\npath_style = \"colon\"\n[spec]\npath = \"swagger.json\"").unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.engine.path_style, PathStyle::Colon);
        assert_eq!(config.spec.path.as_deref(), Some("swagger.json"));
    }

    #[test]
    fn test_loader_with_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"engine": {{"methods": ["GET"]}}}}"#).unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.engine.methods, vec!["GET"]);
    }

    #[test]
    fn test_loader_with_file_bad_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/kanon.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/kanon.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, KanonConfig::default());
    }

    #[test]
    fn test_loader_rejects_invalid_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kanon.toml");
        fs::write(&path, "[engine]\nmethods = []\n").unwrap();

        let result = ConfigLoader::new().with_file(&path).unwrap().load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_bool() {
        for s in ["true", "TRUE", "1", "yes", "on"] {
            assert_eq!(parse_bool(s), Some(true));
        }
        for s in ["false", "False", "0", "no", "off"] {
            assert_eq!(parse_bool(s), Some(false));
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_apply_env_var_engine() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__ENGINE__METHODS", "get, put,", "TEST").unwrap();
        loader.apply_env_var("TEST__ENGINE__PATH_STYLE", "Colon", "TEST").unwrap();
        loader.apply_env_var("TEST__ENGINE__UNRESOLVED", "reject", "TEST").unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.engine.methods, vec!["GET", "PUT"]);
        assert_eq!(config.engine.path_style, PathStyle::Colon);
        assert_eq!(config.engine.unresolved, UnresolvedPolicy::Reject);
    }

    #[test]
    fn test_apply_env_var_spec_path() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__SPEC__PATH", "/srv/api.yaml", "TEST").unwrap();
        assert_eq!(loader.config.spec.path.as_deref(), Some("/srv/api.yaml"));

        loader.apply_env_var("TEST__SPEC__PATH", "", "TEST").unwrap();
        assert!(loader.config.spec.path.is_none());
    }

    #[test]
    fn test_apply_env_var_telemetry() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__TELEMETRY__LOGGING__LEVEL", "debug", "TEST").unwrap();
        loader.apply_env_var("TEST__TELEMETRY__LOGGING__FORMAT", "compact", "TEST").unwrap();
        loader.apply_env_var("TEST__TELEMETRY__METRICS__ENABLED", "off", "TEST").unwrap();
        loader
            .apply_env_var("TEST__TELEMETRY__METRICS__DURATION_BUCKETS", "0.001, 0.01", "TEST")
            .unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.telemetry.logging.level, "debug");
        assert_eq!(config.telemetry.logging.format, LogFormat::Compact);
        assert!(!config.telemetry.metrics.enabled);
        assert_eq!(config.telemetry.metrics.duration_buckets, vec![0.001, 0.01]);
    }

    #[test]
    fn test_apply_env_var_invalid_values() {
        let mut loader = ConfigLoader::new();
        assert!(loader.apply_env_var("TEST__ENGINE__PATH_STYLE", "brackets", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__TELEMETRY__LOGGING__ENABLED", "sure", "TEST").is_err());
        assert!(loader
            .apply_env_var("TEST__TELEMETRY__METRICS__DURATION_BUCKETS", "0.1,fast", "TEST")
            .is_err());
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__SERVER__PORT", "8080", "TEST").unwrap();
        assert_eq!(loader.load_unvalidated(), KanonConfig::default());
    }

    #[test]
    fn test_env_prefix_uppercased() {
        let loader = ConfigLoader::new().with_env_prefix("kanon");
        assert_eq!(loader.env_prefix.as_deref(), Some("KANON"));
    }
}
