//! Specification documents for tests.

use serde_json::{json, Value as JsonValue};

/// A document covering the common validation scenarios.
///
/// | Action | Parameters |
/// |--------|------------|
/// | `GET /users` | `name` required string, `maxLength` 5; `sort` enum `name`/`age`; `limit` integer 1..=100 |
/// | `POST /users` | `user` required body of model `User` |
/// | `POST /age` | `age` required integer 0..=120 |
/// | `DELETE /item/{id}` | `id` path integer; requires `oauth` scope `admin` |
/// | `POST /contact` | `phone` required string |
pub const SCENARIO_SPEC: &str = r##"{
    "swagger": "2.0",
    "info": {"title": "scenarios", "version": "1.0.0"},
    "securityDefinitions": {
        "oauth": {
            "type": "oauth2",
            "flow": "implicit",
            "authorizationUrl": "https://auth.example.com/authorize",
            "scopes": {"admin": "administer items"}
        }
    },
    "paths": {
        "/users": {
            "get": {
                "operationId": "listUsers",
                "parameters": [
                    {"name": "name", "in": "query", "type": "string", "required": true, "maxLength": 5},
                    {"name": "sort", "in": "query", "type": "string", "enum": ["name", "age"]},
                    {"name": "limit", "in": "query", "type": "integer", "minimum": 1, "maximum": 100}
                ]
            },
            "post": {
                "operationId": "createUser",
                "parameters": [
                    {"name": "user", "in": "body", "required": true, "schema": {"$ref": "#/definitions/User"}}
                ]
            }
        },
        "/age": {
            "post": {
                "operationId": "setAge",
                "parameters": [
                    {"name": "age", "in": "formData", "type": "integer", "required": true, "minimum": 0, "maximum": 120}
                ]
            }
        },
        "/item/{id}": {
            "delete": {
                "operationId": "deleteItem",
                "security": [{"oauth": ["admin"]}],
                "parameters": [
                    {"name": "id", "in": "path", "type": "integer", "required": true}
                ]
            }
        },
        "/contact": {
            "post": {
                "operationId": "saveContact",
                "parameters": [
                    {"name": "phone", "in": "formData", "type": "string", "required": true}
                ]
            }
        }
    },
    "definitions": {
        "User": {"type": "object"}
    }
}"##;

/// The same kind of document in YAML, with a shared `$ref` parameter.
pub const YAML_SPEC: &str = r##"swagger: "2.0"
info:
  title: yaml
  version: 1.0.0
parameters:
  page:
    name: page
    in: query
    type: integer
    minimum: 1
paths:
  /orders:
    get:
      operationId: listOrders
      parameters:
        - $ref: "#/parameters/page"
        - name: status
          in: query
          type: string
          enum: [open, closed]
"##;

/// A document with one operation.
pub fn single_operation(
    method: &str,
    path: &str,
    operation_id: &str,
    parameters: &[JsonValue],
) -> String {
    let mut item = serde_json::Map::new();
    item.insert(
        method.to_ascii_lowercase(),
        json!({"operationId": operation_id, "parameters": parameters}),
    );
    json!({"swagger": "2.0", "paths": {path: item}}).to_string()
}

/// A string parameter with optional length bounds.
pub fn string_param(name: &str, required: bool, min: Option<u64>, max: Option<u64>) -> JsonValue {
    let mut param = json!({"name": name, "in": "query", "type": "string", "required": required});
    if let Some(min) = min {
        param["minLength"] = json!(min);
    }
    if let Some(max) = max {
        param["maxLength"] = json!(max);
    }
    param
}

/// An integer parameter with optional bounds.
pub fn integer_param(name: &str, required: bool, min: Option<i64>, max: Option<i64>) -> JsonValue {
    let mut param = json!({"name": name, "in": "query", "type": "integer", "required": required});
    if let Some(min) = min {
        param["minimum"] = json!(min);
    }
    if let Some(max) = max {
        param["maximum"] = json!(max);
    }
    param
}

/// A parameter of any type restricted to `values`.
pub fn enum_param(name: &str, type_name: &str, values: &[JsonValue]) -> JsonValue {
    json!({"name": name, "in": "query", "type": type_name, "enum": values})
}
