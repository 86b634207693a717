//! Actions: one `METHOD /path` operation from the specification.

use http::Method;
use indexmap::IndexMap;

use crate::Parameter;

/// One security requirement object: scheme name to required scopes.
///
/// An action lists alternatives; satisfying any one of them is enough.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// An immutable operation descriptor.
///
/// Actions are built once when a specification is ingested and live as long
/// as the owning engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Identifier, `"<METHOD> <PATH>"`.
    pub id: String,
    /// HTTP method.
    pub method: Method,
    /// Normalized path template.
    pub path: String,
    /// Operation id, returned on success.
    pub operation_id: Option<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Declared security requirements (alternatives).
    pub security: Vec<SecurityRequirement>,
    /// Short summary.
    pub summary: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
}

impl Action {
    /// Formats an action identifier.
    ///
    /// ```
    /// use kanon_core::{Action, Method};
    ///
    /// assert_eq!(Action::key(&Method::GET, "/users"), "GET /users");
    /// ```
    pub fn key(method: &Method, path: &str) -> String {
        format!("{} {}", method.as_str(), path)
    }

    /// Creates an action with no parameters or security.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: Self::key(&method, &path),
            method,
            path,
            operation_id: None,
            parameters: Vec::new(),
            security: Vec::new(),
            summary: None,
            tags: Vec::new(),
            deprecated: false,
        }
    }

    /// Sets the operation id.
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    /// Appends a parameter.
    pub fn parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Appends a security requirement.
    pub fn security(mut self, requirement: SecurityRequirement) -> Self {
        self.security.push(requirement);
        self
    }

    /// Looks up a parameter by name.
    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns true if any security requirement is declared.
    pub fn requires_authorization(&self) -> bool {
        self.security.iter().any(|req| !req.is_empty())
    }

    /// All scopes named by any requirement, deduplicated in order.
    pub fn scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<&str> = Vec::new();
        for scope in self.security.iter().flat_map(|req| req.values().flatten()) {
            if !scopes.contains(&scope.as_str()) {
                scopes.push(scope);
            }
        }
        scopes
    }
}
