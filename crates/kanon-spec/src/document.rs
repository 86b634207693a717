//! The Swagger 2.0 document model.
//!
//! Only the parts the engine consumes are modelled; unknown fields are
//! ignored so that real-world documents parse without ceremony.

use indexmap::IndexMap;
use kanon_core::{ParamLocation, SecurityRequirement};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{SpecError, SpecResult};

/// A parsed Swagger 2.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    /// The `swagger` version field (expected `2.0`).
    #[serde(default)]
    pub swagger: Option<String>,
    /// Present on OpenAPI 3 documents, which are rejected.
    #[serde(default)]
    pub openapi: Option<String>,
    /// Base path prefix declared by the document.
    #[serde(default)]
    pub base_path: Option<String>,
    /// Path templates to path items, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable parameter definitions, targets of `#/parameters/<name>`.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterObject>,
    /// Security scheme definitions.
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Document-wide default security requirements.
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default)]
    pub get: Option<OperationObject>,
    /// PUT operation.
    #[serde(default)]
    pub put: Option<OperationObject>,
    /// POST operation.
    #[serde(default)]
    pub post: Option<OperationObject>,
    /// DELETE operation.
    #[serde(default)]
    pub delete: Option<OperationObject>,
    /// OPTIONS operation.
    #[serde(default)]
    pub options: Option<OperationObject>,
    /// HEAD operation.
    #[serde(default)]
    pub head: Option<OperationObject>,
    /// PATCH operation.
    #[serde(default)]
    pub patch: Option<OperationObject>,
    /// Parameters shared by every operation on this path.
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

/// A single operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationObject {
    /// Operation id.
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Operation parameters, in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    /// Security requirements; `None` inherits the document default.
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Either an inline parameter or a `$ref` to a reusable one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    /// `{"$ref": "#/parameters/name"}`
    Ref {
        /// The reference string.
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline parameter object.
    Item(ParameterObject),
}

/// A Swagger 2.0 parameter object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterObject {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Primitive type; absent on body parameters.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    /// Format modifier.
    #[serde(default)]
    pub format: Option<String>,
    /// Minimum length.
    #[serde(default)]
    pub min_length: Option<u64>,
    /// Maximum length.
    #[serde(default)]
    pub max_length: Option<u64>,
    /// Inclusive lower bound.
    #[serde(default)]
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub maximum: Option<f64>,
    /// Allowed values.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<JsonValue>,
    /// Body schema.
    #[serde(default)]
    pub schema: Option<SchemaObject>,
}

impl ParameterObject {
    /// The type name the engine resolves validators by.
    ///
    /// Body parameters carry no `type`; their schema's `$ref` target name
    /// (`#/definitions/User` gives `User`) or the schema's own type is used.
    pub fn effective_type(&self) -> String {
        if let Some(type_name) = &self.type_name {
            return type_name.clone();
        }
        match &self.schema {
            Some(SchemaObject {
                reference: Some(reference),
                ..
            }) => reference.rsplit('/').next().unwrap_or(reference).to_string(),
            Some(SchemaObject {
                type_name: Some(type_name),
                ..
            }) => type_name.clone(),
            _ => String::new(),
        }
    }
}

/// The subset of a schema object needed to name a body parameter's type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaObject {
    /// `$ref` target.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Inline type.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
}

/// A security scheme definition, kept verbatim for the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// `basic`, `apiKey` or `oauth2`.
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header or query parameter name (`apiKey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `query` or `header` (`apiKey`).
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// OAuth2 flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// OAuth2 authorization URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// OAuth2 token URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// OAuth2 scopes to their descriptions.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scopes: IndexMap<String, String>,
}

impl SwaggerDocument {
    /// Parse a document from bytes.
    ///
    /// Input whose first non-whitespace byte is `{` is read as JSON,
    /// anything else as YAML.
    pub fn from_slice(bytes: &[u8]) -> SpecResult<Self> {
        let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
        let doc: Self = match first {
            None => return Err(SpecError::Empty),
            Some(b'{') => serde_json::from_slice(bytes)?,
            Some(_) => serde_yaml::from_slice(bytes)?,
        };
        doc.check_version()?;

        debug!(
            paths = doc.paths.len(),
            shared_parameters = doc.parameters.len(),
            security_definitions = doc.security_definitions.len(),
            "specification parsed"
        );

        Ok(doc)
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.check_version()?;
        Ok(doc)
    }

    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> SpecResult<Self> {
        let doc: Self = serde_yaml::from_str(yaml)?;
        doc.check_version()?;
        Ok(doc)
    }

    fn check_version(&self) -> SpecResult<()> {
        if let Some(version) = &self.openapi {
            return Err(SpecError::UnsupportedVersion(version.clone()));
        }
        match &self.swagger {
            Some(version) if !version.starts_with("2.") && version != "2" => {
                Err(SpecError::UnsupportedVersion(version.clone()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            SwaggerDocument::from_slice(b"  \n "),
            Err(SpecError::Empty)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SwaggerDocument::from_slice(b"{\"paths\": ["),
            Err(SpecError::Json(_))
        ));
    }

    #[test]
    fn test_yaml_input() {
        let yaml = "swagger: '2.0'\npaths:\n  /ping:\n    get:\n      operationId: ping\n";
        let doc = SwaggerDocument::from_slice(yaml.as_bytes()).unwrap();
        assert!(doc.paths["/ping"].get.is_some());
    }

    #[test]
    fn test_openapi3_rejected() {
        let result = SwaggerDocument::from_json(r#"{"openapi": "3.0.3", "paths": {}}"#);
        assert!(matches!(result, Err(SpecError::UnsupportedVersion(v)) if v == "3.0.3"));
    }

    #[test]
    fn test_missing_version_accepted() {
        let doc = SwaggerDocument::from_json(r#"{"paths": {}}"#).unwrap();
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_parameter_ref_deserializes() {
        let param: ParameterOrRef =
            serde_json::from_str(r##"{"$ref": "#/parameters/page"}"##).unwrap();
        assert!(matches!(param, ParameterOrRef::Ref { reference } if reference == "#/parameters/page"));
    }

    #[test]
    fn test_body_effective_type() {
        let param: ParameterObject = serde_json::from_str(
            r##"{"name": "user", "in": "body", "schema": {"$ref": "#/definitions/User"}}"##,
        )
        .unwrap();
        assert_eq!(param.effective_type(), "User");

        let param: ParameterObject =
            serde_json::from_str(r#"{"name": "tags", "in": "body", "schema": {"type": "array"}}"#)
                .unwrap();
        assert_eq!(param.effective_type(), "array");
    }

    #[test]
    fn test_security_definitions() {
        let doc = SwaggerDocument::from_json(
            r#"{
                "swagger": "2.0",
                "securityDefinitions": {
                    "oauth": {
                        "type": "oauth2",
                        "flow": "implicit",
                        "authorizationUrl": "https://auth.example.com",
                        "scopes": {"admin": "administer items"}
                    }
                }
            }"#,
        )
        .unwrap();

        let scheme = &doc.security_definitions["oauth"];
        assert_eq!(scheme.scheme_type, "oauth2");
        assert_eq!(scheme.scopes["admin"], "administer items");
    }
}
