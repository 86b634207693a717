//! # Kanon Engine
//!
//! The validation engine: an action registry built from a Swagger 2.0
//! document, per-name and per-type validator overrides, the built-in
//! validators, and the orchestration that walks an action's parameters.
//!
//! ## Flow
//!
//! ```text
//!  caller ──validate(id, props)──▶ Engine
//!                                   │ ActionRegistry::get(id)       miss ⇒ unknown action
//!                                   │ props.authorize(action)       false ⇒ forbidden
//!                                   │ for each parameter, in order:
//!                                   │   ValidatorRegistry::resolve  none ⇒ skip (or reject)
//!                                   │   props.get                   "" ⇒ missing / skip
//!                                   │   enum check                  miss ⇒ out of range
//!                                   │   Validator::validate         err ⇒ its kind
//!                                   ▼   props.set(name, value)
//!                                Accepted { operation_id }
//! ```
//!
//! Validation never panics and never rolls back: values written for earlier
//! parameters stay written when a later one fails.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod actions;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod validators;

pub use actions::ActionRegistry;
pub use config::{EngineConfig, PathStyle, UnresolvedPolicy};
pub use engine::{colon_path, Engine, PathNormalizer, UnresolvedParameter};
pub use error::{IngestError, IngestResult};
pub use registry::{Resolution, ValidatorRegistry};
