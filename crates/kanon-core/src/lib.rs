//! # Kanon Core
//!
//! Core types and traits for the Kanon parameter validation engine.
//!
//! This crate provides the foundational types used throughout Kanon:
//!
//! - [`Parameter`] - An immutable parameter descriptor from the API description
//! - [`Action`] - One `METHOD /path` operation with its ordered parameter list
//! - [`Value`] - The coerced, typed form of a raw parameter value
//! - [`Accepted`] / [`Rejection`] - The two halves of a validation outcome
//! - [`Validator`] - The check-and-coerce contract for a single raw value
//! - [`Props`] - The capability a caller hands to the engine for each request

#![doc(html_root_url = "https://docs.rs/kanon-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod outcome;
mod parameter;
mod props;
mod validator;
mod value;

pub use action::{Action, SecurityRequirement};
pub use error::ErrorKind;
pub use outcome::{Accepted, Outcome, Rejection};
pub use parameter::{literal_string, Constraints, ParamLocation, ParamType, Parameter};
pub use props::Props;
pub use validator::{SharedValidator, Validator, Verdict};
pub use value::Value;

/// Re-exported so downstream crates agree on the method type.
pub use http::Method;
