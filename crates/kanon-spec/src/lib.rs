//! Swagger 2.0 document parsing for Kanon.
//!
//! This crate turns the bytes of an API description into the records the
//! engine ingests: operations keyed by method and path, each with its
//! resolved parameter list and security requirements, plus the document's
//! security-definitions table.
//!
//! # Example
//!
//! ```
//! use kanon_spec::SwaggerDocument;
//!
//! let doc = SwaggerDocument::from_slice(br#"{
//!     "swagger": "2.0",
//!     "paths": {
//!         "/users": {
//!             "get": {
//!                 "operationId": "listUsers",
//!                 "parameters": [
//!                     {"name": "name", "in": "query", "type": "string", "maxLength": 5}
//!                 ]
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let ops = doc.operations().unwrap();
//! assert_eq!(ops[0].operation_id.as_deref(), Some("listUsers"));
//! assert_eq!(ops[0].parameters[0].max_length, Some(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod operation;

pub use document::{
    OperationObject, ParameterObject, ParameterOrRef, PathItem, SchemaObject, SecurityScheme,
    SwaggerDocument,
};
pub use error::{SpecError, SpecResult};
pub use operation::OperationRecord;
