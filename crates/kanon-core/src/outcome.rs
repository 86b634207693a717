//! Validation outcomes.

use serde::Serialize;
use thiserror::Error;

use crate::{Constraints, ErrorKind, Parameter};

/// Result of validating one action.
pub type Outcome = Result<Accepted, Rejection>;

/// An action whose parameters all passed.
///
/// Coerced values are not carried here; they were already written back
/// through [`Props::set`](crate::Props::set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accepted {
    /// The operation id of the matched action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters skipped because no validator resolved for them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl Accepted {
    /// Returns true if some parameter went unchecked.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// A rejected action or parameter.
///
/// `name` is the action identifier for action-level kinds and the parameter
/// name otherwise. `constraints` is present for failures raised while
/// checking a value.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{name}: {kind}")]
pub struct Rejection {
    /// Offending action identifier or parameter name.
    pub name: String,
    /// Why it was rejected.
    pub kind: ErrorKind,
    /// The parameter's declared constraints.
    #[serde(flatten)]
    pub constraints: Option<Constraints>,
}

impl Rejection {
    /// No action is registered under `action_id`.
    pub fn unknown_action(action_id: impl Into<String>) -> Self {
        Self {
            name: action_id.into(),
            kind: ErrorKind::UnknownAction,
            constraints: None,
        }
    }

    /// The authorization gate denied `action_id`.
    pub fn forbidden(action_id: impl Into<String>) -> Self {
        Self {
            name: action_id.into(),
            kind: ErrorKind::Forbidden,
            constraints: None,
        }
    }

    /// A required parameter is absent.
    pub fn missing(param: &Parameter) -> Self {
        Self {
            name: param.name.clone(),
            kind: ErrorKind::MissingRequired,
            constraints: None,
        }
    }

    /// A parameter value failed with `kind`; echoes its constraints.
    pub fn invalid(param: &Parameter, kind: ErrorKind) -> Self {
        Self {
            name: param.name.clone(),
            kind,
            constraints: Some(param.constraints()),
        }
    }
}
