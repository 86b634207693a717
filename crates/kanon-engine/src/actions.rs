//! The action registry built from a specification.

use indexmap::IndexMap;
use kanon_core::{Action, Method};
use kanon_spec::{SecurityScheme, SpecResult, SwaggerDocument};
use tracing::debug;

/// Actions keyed by `"<METHOD> <PATH>"`, plus the document's security
/// scheme table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: IndexMap<String, Action>,
    security_definitions: IndexMap<String, SecurityScheme>,
}

impl ActionRegistry {
    /// Builds a registry from every operation of `doc` whose method is in
    /// `methods`. `normalize` turns a path template into the path part of
    /// the action key. If two operations normalize to the same key the later
    /// one replaces the earlier.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::UnresolvedReference` if a parameter reference does not resolve.
    pub fn build(
        doc: &SwaggerDocument,
        methods: &[Method],
        normalize: &dyn Fn(&str) -> String,
    ) -> SpecResult<Self> {
        let mut actions = IndexMap::new();

        for record in doc.operations()? {
            if !methods.contains(&record.method) {
                continue;
            }

            let path = normalize(&record.path);
            let id = Action::key(&record.method, &path);
            debug!(
                action = %id,
                operation_id = record.operation_id.as_deref().unwrap_or(""),
                parameters = record.parameters.len(),
                "action registered"
            );

            let action = Action {
                id: id.clone(),
                method: record.method,
                path,
                operation_id: record.operation_id,
                parameters: record.parameters,
                security: record.security,
                summary: record.summary,
                tags: record.tags,
                deprecated: record.deprecated,
            };
            if actions.insert(id.clone(), action).is_some() {
                debug!(action = %id, "action replaced by a later operation with the same key");
            }
        }

        Ok(Self {
            actions,
            security_definitions: doc.security_definitions.clone(),
        })
    }

    /// Looks up an action by identifier.
    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    /// All actions in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// All action identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no action is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The security scheme table captured at ingestion.
    pub fn security_definitions(&self) -> &IndexMap<String, SecurityScheme> {
        &self.security_definitions
    }
}
