//! # Kanon
//!
//! **Contract-driven request parameter validation**
//!
//! Kanon reads a Swagger 2.0 document into a registry of actions
//! (`"<METHOD> <PATH>"` to an ordered parameter list), then checks and
//! coerces the raw parameter values of each request against the matching
//! action.
//!
//! - **Declarative**: types, required-ness, length and numeric bounds and
//!   enumerations come from the document
//! - **Extensible**: override validation per parameter name or per model type
//! - **Host-agnostic**: the host supplies raw values, receives typed ones and
//!   answers the authorization gate through the [`Props`](core::Props) trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kanon::prelude::*;
//!
//! let mut engine = Engine::from_spec(&std::fs::read("swagger.json")?)?;
//! engine.register_validator("phone", FormatValidator::mobile());
//!
//! match engine.validate("POST /contact", &mut request) {
//!     Ok(accepted) => dispatch(accepted.operation_id),
//!     Err(rejection) => respond_400(&rejection),
//! }
//! ```
//!
//! ## Validation order
//!
//! ```text
//! lookup → authorize → for each parameter: resolve → read → required → enum → validate → write
//! ```
//!
//! The first failing parameter is reported. Values already written for
//! earlier parameters are not rolled back.

#![doc(html_root_url = "https://docs.rs/kanon/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bootstrap;
pub mod global;

pub use bootstrap::{bootstrap, build_engine, BootstrapError};

// Re-export core types
pub use kanon_core as core;

// Re-export specification parsing
pub use kanon_spec as spec;

// Re-export the engine
pub use kanon_engine as engine;

// Re-export telemetry
pub use kanon_telemetry as telemetry;

// Re-export configuration
pub use kanon_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use kanon::prelude::*;
/// ```
pub mod prelude {
    pub use kanon_core::{
        Accepted, Action, ErrorKind, Outcome, Parameter, Props, Rejection, Validator, Value,
        Verdict,
    };

    pub use kanon_engine::validators::{
        BooleanValidator, Composite, FormatValidator, IntegerValidator, NumberValidator,
        StringValidator,
    };
    pub use kanon_engine::{Engine, EngineConfig, PathStyle, UnresolvedPolicy};

    pub use kanon_config::{ConfigLoader, KanonConfig};
}
