//! Parameter descriptors.
//!
//! A [`Parameter`] is the immutable record the engine validates a raw value
//! against. It is produced once, when a specification is ingested, and never
//! mutated afterwards.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Query string parameter.
    Query,
    /// Request header.
    Header,
    /// Templated path segment.
    Path,
    /// Form field (`application/x-www-form-urlencoded` or multipart).
    FormData,
    /// Request body.
    Body,
}

impl ParamLocation {
    /// Returns the name used for this location in a Swagger document.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::FormData => "formData",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a parameter.
///
/// The four primitives have built-in validators. Anything else is a named
/// model type that only resolves through a registered type override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType<'a> {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// Any other type name.
    Model(&'a str),
}

impl<'a> ParamType<'a> {
    /// Classifies a type name from the specification.
    pub fn parse(name: &'a str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            other => Self::Model(other),
        }
    }

    /// Returns the type name as written in the specification.
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Model(name) => name,
        }
    }

    /// Returns true for the four built-in primitives.
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Model(_))
    }
}

/// An immutable parameter descriptor.
///
/// # Example
///
/// ```
/// use kanon_core::{Parameter, ParamType};
///
/// let param = Parameter::new("name", "string").required().max_length(5);
/// assert_eq!(param.param_type(), ParamType::String);
/// assert!(param.required);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name, unique within an action.
    pub name: String,
    /// Where the parameter is carried.
    pub location: ParamLocation,
    /// Declared type name (`string`, `integer`, `number`, `boolean` or a model name).
    pub type_name: String,
    /// Optional format modifier (`int64`, `date-time`, ...).
    pub format: Option<String>,
    /// Whether an empty raw value is a failure.
    pub required: bool,
    /// Minimum length in code points (strings only).
    pub min_length: Option<u64>,
    /// Maximum length in code points (strings only).
    pub max_length: Option<u64>,
    /// Inclusive lower bound (numeric types only).
    pub minimum: Option<f64>,
    /// Inclusive upper bound (numeric types only).
    pub maximum: Option<f64>,
    /// Allowed literal values, compared by string rendering.
    pub enum_values: Vec<JsonValue>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl Parameter {
    /// Creates an optional query parameter with no constraints.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Query,
            type_name: type_name.into(),
            format: None,
            required: false,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            enum_values: Vec::new(),
            description: None,
        }
    }

    /// Sets the location.
    pub fn located(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the minimum length.
    pub fn min_length(mut self, len: u64) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Sets the maximum length.
    pub fn max_length(mut self, len: u64) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Sets the inclusive lower bound.
    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Sets the allowed values.
    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the format modifier.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Classifies the declared type.
    pub fn param_type(&self) -> ParamType<'_> {
        ParamType::parse(&self.type_name)
    }

    /// Returns true if `raw` is one of the enumerated values, or if there is
    /// no enumeration.
    pub fn allows(&self, raw: &str) -> bool {
        self.enum_values.is_empty() || self.enum_values.iter().any(|e| literal_string(e) == raw)
    }

    /// Copies the declared constraints for echoing back in a failure.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_length: self.min_length,
            max_length: self.max_length,
            minimum: self.minimum,
            maximum: self.maximum,
            enum_values: self.enum_values.clone(),
        }
    }
}

/// Renders an enumeration literal the way a raw request value would spell it.
///
/// Strings render without quotes, whole floats without a trailing `.0`,
/// `null` as `null`, and arrays or objects as compact JSON.
pub fn literal_string(value: &JsonValue) -> Cow<'_, str> {
    match value {
        JsonValue::String(s) => Cow::Borrowed(s.as_str()),
        JsonValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        JsonValue::Null => Cow::Borrowed("null"),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cow::Owned(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Cow::Owned(u.to_string())
            } else {
                Cow::Owned(n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()))
            }
        }
        other => Cow::Owned(other.to_string()),
    }
}

/// The constraints of a parameter, echoed back on failure so a caller can
/// render a precise message without consulting the specification again.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Minimum length in code points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum length in code points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<JsonValue>,
}
