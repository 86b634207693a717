//! Error kinds.
//!
//! Failures are tagged, not typed: every rejected parameter or action carries
//! exactly one [`ErrorKind`].

use std::fmt;

use serde::{Serialize, Serializer};

/// Why a parameter or action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No action is registered under the identifier.
    UnknownAction,
    /// The caller's authorization gate denied the action.
    Forbidden,
    /// A required parameter was absent.
    MissingRequired,
    /// The raw value does not parse as the declared primitive type.
    Type,
    /// A length, numeric bound or enumeration was violated.
    Range,
    /// The value is not a mobile phone number.
    Mobile,
    /// The value is not an email address.
    Email,
    /// The value is not a national ID card number.
    IdCard,
    /// No validator resolves for the parameter and the engine rejects
    /// unresolved parameters.
    NoValidator,
    /// A kind reported by a caller-supplied validator.
    Custom(String),
}

impl ErrorKind {
    /// Creates a custom kind.
    pub fn custom(kind: impl Into<String>) -> Self {
        Self::Custom(kind.into())
    }

    /// Stable machine-readable tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::UnknownAction => "unknown_action",
            Self::Forbidden => "forbidden",
            Self::MissingRequired => "missing_required",
            Self::Type => "type_error",
            Self::Range => "range_error",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::IdCard => "id_card",
            Self::NoValidator => "no_validator",
            Self::Custom(kind) => kind,
        }
    }

    /// Returns true for kinds raised before any parameter is read.
    pub const fn is_action_level(&self) -> bool {
        matches!(self, Self::UnknownAction | Self::Forbidden)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction => f.write_str("unknown action"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::MissingRequired => f.write_str("missing required parameter"),
            Self::Type => f.write_str("type error"),
            Self::Range => f.write_str("out of range"),
            Self::Mobile => f.write_str("invalid mobile number"),
            Self::Email => f.write_str("invalid email address"),
            Self::IdCard => f.write_str("invalid ID card number"),
            Self::NoValidator => f.write_str("no validator"),
            Self::Custom(kind) => f.write_str(kind),
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
