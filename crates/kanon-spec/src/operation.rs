//! Flattening a document into operation records.
//!
//! This is where references are resolved, path-level parameters are merged
//! into each operation and document-level security is inherited.

use kanon_core::{Method, ParamLocation, Parameter, SecurityRequirement};

use crate::document::{OperationObject, ParameterObject, ParameterOrRef, PathItem, SwaggerDocument};
use crate::error::{SpecError, SpecResult};

const PARAMETER_REF_PREFIX: &str = "#/parameters/";

/// One operation, ready to be registered as an action.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// HTTP method.
    pub method: Method,
    /// Path template exactly as written in the document.
    pub path: String,
    /// Operation id.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Whether deprecated.
    pub deprecated: bool,
    /// Resolved parameters: path-level first, then operation-level.
    pub parameters: Vec<Parameter>,
    /// Effective security requirements.
    pub security: Vec<SecurityRequirement>,
}

impl SwaggerDocument {
    /// Flatten every operation in the document, in document order.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::UnresolvedReference` if a parameter `$ref` does not
    /// name an entry of the document's `parameters` table.
    pub fn operations(&self) -> SpecResult<Vec<OperationRecord>> {
        let mut records = Vec::new();

        for (path, item) in &self.paths {
            let shared = self.resolve_all(&item.parameters, path)?;

            for (method, op) in item.methods() {
                let own = self.resolve_all(&op.parameters, path)?;
                records.push(OperationRecord {
                    method,
                    path: path.clone(),
                    operation_id: op.operation_id.clone(),
                    summary: op.summary.clone(),
                    tags: op.tags.clone(),
                    deprecated: op.deprecated,
                    parameters: merge_parameters(&shared, own),
                    security: op
                        .security
                        .as_ref()
                        .or(self.security.as_ref())
                        .cloned()
                        .unwrap_or_default(),
                });
            }
        }

        Ok(records)
    }

    fn resolve_all(&self, params: &[ParameterOrRef], path: &str) -> SpecResult<Vec<Parameter>> {
        params
            .iter()
            .map(|p| self.resolve(p, path).map(to_parameter))
            .collect()
    }

    fn resolve<'a>(&'a self, param: &'a ParameterOrRef, path: &str) -> SpecResult<&'a ParameterObject> {
        match param {
            ParameterOrRef::Item(object) => Ok(object),
            ParameterOrRef::Ref { reference } => reference
                .strip_prefix(PARAMETER_REF_PREFIX)
                .and_then(|name| self.parameters.get(name))
                .ok_or_else(|| SpecError::unresolved(reference, path)),
        }
    }
}

impl PathItem {
    /// The operations present on this path, in a fixed method order.
    pub fn methods(&self) -> impl Iterator<Item = (Method, &OperationObject)> {
        [
            (Method::GET, self.get.as_ref()),
            (Method::PUT, self.put.as_ref()),
            (Method::POST, self.post.as_ref()),
            (Method::DELETE, self.delete.as_ref()),
            (Method::OPTIONS, self.options.as_ref()),
            (Method::HEAD, self.head.as_ref()),
            (Method::PATCH, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

fn to_parameter(object: &ParameterObject) -> Parameter {
    Parameter {
        name: object.name.clone(),
        location: object.location,
        type_name: object.effective_type(),
        format: object.format.clone(),
        required: object.required || object.location == ParamLocation::Path,
        min_length: object.min_length,
        max_length: object.max_length,
        minimum: object.minimum,
        maximum: object.maximum,
        enum_values: object.enum_values.clone(),
        description: object.description.clone(),
    }
}

// Operation-level parameters replace path-level ones with the same name and
// location, keeping the path-level position.
fn merge_parameters(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = shared.to_vec();
    for param in own {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }
    merged
}
