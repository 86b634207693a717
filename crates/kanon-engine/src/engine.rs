//! The validation engine.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use indexmap::IndexMap;
use kanon_core::{
    Accepted, Action, ErrorKind, Outcome, Parameter, Props, Rejection, Validator, Value,
};
use kanon_spec::{SecurityScheme, SwaggerDocument};
use kanon_telemetry::metrics;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::actions::ActionRegistry;
use crate::config::{EngineConfig, PathStyle, UnresolvedPolicy};
use crate::error::IngestResult;
use crate::registry::{Resolution, ValidatorRegistry};

/// Turns a path template into the path part of an action identifier.
pub type PathNormalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A parameter that no validator currently resolves for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedParameter {
    /// Action identifier.
    pub action: String,
    /// Parameter name.
    pub parameter: String,
    /// Declared type name.
    pub type_name: String,
}

/// Validates request parameters against the actions of an ingested
/// specification.
///
/// Configure the engine (ingest, register) before sharing it; afterwards
/// [`validate`](Engine::validate) only needs `&self` and any number of
/// threads may call it. Re-ingesting or registering while others validate
/// needs external locking, e.g. an `RwLock<Engine>`.
///
/// # Example
///
/// ```
/// use kanon_engine::{validators::FormatValidator, Engine};
///
/// let spec = br#"{
///     "swagger": "2.0",
///     "paths": {"/users": {"get": {
///         "operationId": "listUsers",
///         "parameters": [{"name": "phone", "in": "query", "type": "string", "required": true}]
///     }}}
/// }"#;
///
/// let mut engine = Engine::from_spec(spec).unwrap();
/// engine.register_validator("phone", FormatValidator::mobile());
/// assert!(engine.action("GET /users").is_some());
/// ```
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    actions: ActionRegistry,
    validators: ValidatorRegistry,
    normalizer: PathNormalizer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with no actions and the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An engine with no actions.
    pub fn with_config(config: EngineConfig) -> Self {
        let normalizer = normalizer_for(config.path_style);
        Self {
            config,
            actions: ActionRegistry::default(),
            validators: ValidatorRegistry::new(),
            normalizer,
        }
    }

    /// Creates a default engine and ingests `spec`.
    ///
    /// # Errors
    ///
    /// Returns the ingestion error.
    pub fn from_spec(spec: &[u8]) -> IngestResult<Self> {
        let mut engine = Self::new();
        engine.ingest(spec)?;
        Ok(engine)
    }

    /// Replaces the action registry with the actions of `spec`.
    ///
    /// The new registry is built completely before it is swapped in; on any
    /// error the previous registry is kept.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Spec` if the document does not parse or a
    /// reference does not resolve, and `IngestError::InvalidMethod` for a
    /// bad configured method.
    pub fn ingest(&mut self, spec: &[u8]) -> IngestResult<()> {
        let result = SwaggerDocument::from_slice(spec)
            .map_err(Into::into)
            .and_then(|doc| self.build_registry(&doc));
        self.install(result)
    }

    /// Like [`ingest`](Engine::ingest), for an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns the ingestion error.
    pub fn ingest_document(&mut self, doc: &SwaggerDocument) -> IngestResult<()> {
        let result = self.build_registry(doc);
        self.install(result)
    }

    fn build_registry(&self, doc: &SwaggerDocument) -> IngestResult<ActionRegistry> {
        let methods = self.config.parsed_methods()?;
        let registry = ActionRegistry::build(doc, &methods, self.normalizer.as_ref())?;
        Ok(registry)
    }

    fn install(&mut self, result: IngestResult<ActionRegistry>) -> IngestResult<()> {
        match result {
            Ok(registry) => {
                info!(
                    actions = registry.len(),
                    security_definitions = registry.security_definitions().len(),
                    "specification ingested"
                );
                metrics::record_ingestion(true);
                self.actions = registry;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "specification ingestion failed; previous actions kept");
                metrics::record_ingestion(false);
                Err(e)
            }
        }
    }

    /// Replaces the path normalizer used by subsequent ingestions.
    ///
    /// Existing actions keep their identifiers until the next ingestion.
    pub fn set_path_normalizer<F>(&mut self, normalizer: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalizer = Arc::new(normalizer);
    }

    /// Uses `validator` for every parameter called `name`, ahead of the
    /// built-in for its type. Last registration wins.
    pub fn register_validator(&mut self, name: impl Into<String>, validator: impl Validator + 'static) {
        self.validators.register_by_name(name, validator);
    }

    /// Uses `validator` for every parameter whose declared model type is
    /// `type_name`. Last registration wins.
    pub fn register_model_validator(
        &mut self,
        type_name: impl Into<String>,
        validator: impl Validator + 'static,
    ) {
        self.validators.register_by_type(type_name, validator);
    }

    /// Validates the parameters of `action_id`.
    ///
    /// Looks the action up, asks `props` to authorize it, then checks each
    /// parameter in declaration order and stops at the first failure. Each
    /// coerced value is written through [`Props::set`] as soon as its
    /// parameter passes, so on failure the values of earlier parameters have
    /// already been written.
    pub fn validate<P: Props + ?Sized>(&self, action_id: &str, props: &mut P) -> Outcome {
        let started = Instant::now();
        let outcome = self.run(action_id, props);
        let elapsed = started.elapsed();
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        match &outcome {
            Ok(accepted) => {
                metrics::record_validation(action_id, "accepted", elapsed);
                debug!(
                    action = action_id,
                    skipped = accepted.skipped.len(),
                    elapsed_us,
                    "validation accepted"
                );
            }
            Err(rejection) => {
                // unknown identifiers come from callers; keep them out of labels
                let label = if rejection.kind == ErrorKind::UnknownAction {
                    "unknown"
                } else {
                    action_id
                };
                metrics::record_validation(label, "rejected", elapsed);
                metrics::record_failure(rejection.kind.as_str());
                debug!(
                    action = action_id,
                    name = %rejection.name,
                    kind = rejection.kind.as_str(),
                    elapsed_us,
                    "validation rejected"
                );
            }
        }

        outcome
    }

    fn run<P: Props + ?Sized>(&self, action_id: &str, props: &mut P) -> Outcome {
        let action = self
            .actions
            .get(action_id)
            .ok_or_else(|| Rejection::unknown_action(action_id))?;

        if !props.authorize(action) {
            return Err(Rejection::forbidden(action_id));
        }

        let mut accepted = Accepted {
            operation_id: action.operation_id.clone(),
            skipped: Vec::new(),
        };

        for param in &action.parameters {
            let resolution = self.validators.resolve(param);
            let Some(validator) = resolution.validator() else {
                self.unresolved(action, param, &mut accepted)?;
                continue;
            };

            let value = {
                let raw = props.get(param);
                let raw = raw.as_deref().unwrap_or("");

                if raw.is_empty() {
                    if param.required {
                        return Err(Rejection::missing(param));
                    }
                    continue;
                }

                if !param.allows(raw) {
                    return Err(Rejection::invalid(param, ErrorKind::Range));
                }

                match validator.validate(param, raw) {
                    Ok(Some(value)) => value,
                    Ok(None) => Value::String(raw.to_string()),
                    Err(kind) => return Err(Rejection::invalid(param, kind)),
                }
            };

            props.set(&param.name, value);
        }

        Ok(accepted)
    }

    fn unresolved(
        &self,
        action: &Action,
        param: &Parameter,
        accepted: &mut Accepted,
    ) -> Result<(), Rejection> {
        metrics::record_unresolved(&param.type_name);
        match self.config.unresolved {
            UnresolvedPolicy::Skip => {
                warn!(
                    action = %action.id,
                    parameter = %param.name,
                    type_name = %param.type_name,
                    "no validator for parameter type; skipped"
                );
                accepted.skipped.push(param.name.clone());
                Ok(())
            }
            UnresolvedPolicy::Reject => {
                warn!(
                    action = %action.id,
                    parameter = %param.name,
                    type_name = %param.type_name,
                    "no validator for parameter type; rejected"
                );
                Err(Rejection::invalid(param, ErrorKind::NoValidator))
            }
        }
    }

    /// Looks up an action by identifier.
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    /// All actions, in document order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// The security scheme table of the last ingested document.
    pub fn security_definitions(&self) -> &IndexMap<String, SecurityScheme> {
        self.actions.security_definitions()
    }

    /// Parameters that no validator resolves for, with the current
    /// registrations. Use it after configuration to audit a specification.
    pub fn unresolved_parameters(&self) -> Vec<UnresolvedParameter> {
        self.actions
            .iter()
            .flat_map(|action| {
                action
                    .parameters
                    .iter()
                    .filter(|param| matches!(self.validators.resolve(param), Resolution::Unresolved))
                    .map(|param| UnresolvedParameter {
                        action: action.id.clone(),
                        parameter: param.name.clone(),
                        type_name: param.type_name.clone(),
                    })
            })
            .collect()
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("actions", &self.actions.len())
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

fn normalizer_for(style: PathStyle) -> PathNormalizer {
    match style {
        PathStyle::Template => Arc::new(|path: &str| path.to_string()),
        PathStyle::Colon => Arc::new(|path: &str| colon_path(path).into_owned()),
    }
}

/// Rewrites `{name}` path segments as `:name`.
///
/// ```
/// assert_eq!(kanon_engine::colon_path("/item/{id}/tags/{tag}"), "/item/:id/tags/:tag");
/// ```
pub fn colon_path(path: &str) -> Cow<'_, str> {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    let re = PARAM.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));
    re.replace_all(path, ":$1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{Composite, FormatValidator, StringValidator};
    use kanon_core::Verdict;
    use kanon_test::{fixtures, MapProps};

    fn engine() -> Engine {
        Engine::from_spec(fixtures::SCENARIO_SPEC.as_bytes()).unwrap()
    }

    #[test]
    fn test_unknown_action() {
        let mut props = MapProps::new();
        let err = engine().validate("GET /missing", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownAction);
        assert_eq!(err.name, "GET /missing");
        assert!(err.constraints.is_none());
    }

    #[test]
    fn test_forbidden_before_any_read() {
        let mut props = MapProps::new().with("id", "7").deny_all();
        let err = engine().validate("DELETE /item/{id}", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.name, "DELETE /item/{id}");
        assert_eq!(props.reads(), 0);
        assert!(props.written().is_empty());
    }

    #[test]
    fn test_string_too_long() {
        let mut props = MapProps::new().with("name", "abcdef");
        let err = engine().validate("GET /users", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Range);
        assert_eq!(err.name, "name");
        assert_eq!(err.constraints.unwrap().max_length, Some(5));
    }

    #[test]
    fn test_string_accepted() {
        let mut props = MapProps::new().with("name", "ab");
        let accepted = engine().validate("GET /users", &mut props).unwrap();
        assert_eq!(accepted.operation_id.as_deref(), Some("listUsers"));
        assert_eq!(props.value("name"), Some(&Value::String("ab".to_string())));
    }

    #[test]
    fn test_missing_required_carries_no_constraints() {
        let mut props = MapProps::new();
        let err = engine().validate("GET /users", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequired);
        assert_eq!(err.name, "name");
        assert!(err.constraints.is_none());
    }

    #[test]
    fn test_integer_scenarios() {
        let engine = engine();
        for (raw, kind) in [("abc", ErrorKind::Type), ("150", ErrorKind::Range)] {
            let mut props = MapProps::new().with("age", raw);
            assert_eq!(engine.validate("POST /age", &mut props).unwrap_err().kind, kind);
        }

        let mut props = MapProps::new().with("age", "30");
        assert!(engine.validate("POST /age", &mut props).is_ok());
        assert_eq!(props.value("age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_enum_checked_before_type() {
        let mut props = MapProps::new().with("name", "ab").with("sort", "size");
        let err = engine().validate("GET /users", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Range);
        assert_eq!(err.name, "sort");
        assert_eq!(err.constraints.unwrap().enum_values.len(), 2);
    }

    #[test]
    fn test_partial_write_back() {
        let mut props = MapProps::new().with("name", "ab").with("limit", "x");
        let err = engine().validate("GET /users", &mut props).unwrap_err();
        assert_eq!(err.name, "limit");
        assert_eq!(props.value("name"), Some(&Value::String("ab".to_string())));
        assert!(props.value("limit").is_none());
    }

    #[test]
    fn test_name_override_beats_builtin() {
        let mut engine = engine();
        engine.register_validator("phone", FormatValidator::mobile());

        let mut props = MapProps::new().with("phone", "13800138000");
        assert!(engine.validate("POST /contact", &mut props).is_ok());

        let mut props = MapProps::new().with("phone", "12345");
        let err = engine.validate("POST /contact", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Mobile);
        assert_eq!(err.name, "phone");
    }

    #[test]
    fn test_validator_without_value_writes_raw() {
        let mut engine = engine();
        engine.register_validator("phone", |_: &Parameter, _: &str| -> Verdict { Ok(None) });

        let mut props = MapProps::new().with("phone", "anything");
        engine.validate("POST /contact", &mut props).unwrap();
        assert_eq!(props.value("phone"), Some(&Value::String("anything".to_string())));
    }

    #[test]
    fn test_unresolved_model_skipped() {
        let engine = engine();
        let mut props = MapProps::new().with("user", "{}");
        let accepted = engine.validate("POST /users", &mut props).unwrap();
        assert_eq!(accepted.skipped, vec!["user".to_string()]);
        assert!(props.written().is_empty());
        assert_eq!(props.reads(), 0);
    }

    #[test]
    fn test_unresolved_model_rejected_when_strict() {
        let mut engine = Engine::with_config(EngineConfig::strict());
        engine.ingest(fixtures::SCENARIO_SPEC.as_bytes()).unwrap();

        let mut props = MapProps::new().with("user", "{}");
        let err = engine.validate("POST /users", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoValidator);
        assert_eq!(err.name, "user");
    }

    #[test]
    fn test_model_validator() {
        let mut engine = engine();
        engine.register_model_validator(
            "User",
            Composite::new().then(StringValidator).then(|_: &Parameter, raw: &str| -> Verdict {
                if raw.starts_with('{') {
                    Ok(None)
                } else {
                    Err(ErrorKind::custom("not_an_object"))
                }
            }),
        );

        let mut props = MapProps::new().with("user", "{}");
        let accepted = engine.validate("POST /users", &mut props).unwrap();
        assert!(!accepted.has_skipped());
        assert_eq!(props.value("user"), Some(&Value::String("{}".to_string())));

        let mut props = MapProps::new().with("user", "[]");
        let err = engine.validate("POST /users", &mut props).unwrap_err();
        assert_eq!(err.kind, ErrorKind::custom("not_an_object"));
    }

    #[test]
    fn test_unresolved_parameters_audit() {
        let mut engine = engine();
        let unresolved = engine.unresolved_parameters();
        assert_eq!(
            unresolved,
            vec![UnresolvedParameter {
                action: "POST /users".to_string(),
                parameter: "user".to_string(),
                type_name: "User".to_string(),
            }]
        );

        engine.register_model_validator("User", StringValidator);
        assert!(engine.unresolved_parameters().is_empty());
    }

    #[test]
    fn test_failed_ingestion_keeps_registry() {
        let mut engine = engine();
        let before: Vec<_> = engine.actions().map(|a| a.id.clone()).collect();

        assert!(engine.ingest(b"{ not json").is_err());
        assert!(engine.ingest(b"").is_err());

        let after: Vec<_> = engine.actions().map(|a| a.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reingest_replaces_registry() {
        let mut engine = engine();
        engine
            .ingest(br#"{"swagger": "2.0", "paths": {"/ping": {"get": {"operationId": "ping"}}}}"#)
            .unwrap();
        assert!(engine.action("GET /users").is_none());
        assert!(engine.action("GET /ping").is_some());
    }

    #[test]
    fn test_colon_path_style() {
        let config = EngineConfig::default().with_path_style(PathStyle::Colon);
        let mut engine = Engine::with_config(config);
        engine.ingest(fixtures::SCENARIO_SPEC.as_bytes()).unwrap();
        assert!(engine.action("DELETE /item/:id").is_some());
        assert!(engine.action("DELETE /item/{id}").is_none());
    }

    #[test]
    fn test_custom_normalizer() {
        let mut engine = Engine::new();
        engine.set_path_normalizer(|path: &str| path.trim_end_matches('/').to_string());
        engine
            .ingest(br#"{"paths": {"/ping/": {"get": {}}}}"#)
            .unwrap();
        assert!(engine.action("GET /ping").is_some());
    }

    #[test]
    fn test_colon_path() {
        assert_eq!(colon_path("/users"), "/users");
        assert_eq!(colon_path("/a/{b}/c/{d}"), "/a/:b/c/:d");
    }

    #[test]
    fn test_success_has_no_parameter_name() {
        let mut props = MapProps::new().with("name", "ab");
        let accepted = engine().validate("GET /users", &mut props).unwrap();
        assert_eq!(
            serde_json::to_value(&accepted).unwrap(),
            serde_json::json!({"operationId": "listUsers"})
        );
    }
}
