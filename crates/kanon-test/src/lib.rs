//! # Kanon Test
//!
//! Test utilities for Kanon: an in-memory [`Props`](kanon_core::Props)
//! implementation that records every read and write, and ready-made
//! specification documents.
//!
//! ## Example
//!
//! ```ignore
//! use kanon_engine::Engine;
//! use kanon_test::{fixtures, MapProps};
//!
//! let engine = Engine::from_spec(fixtures::SCENARIO_SPEC.as_bytes()).unwrap();
//!
//! let mut props = MapProps::new().with("age", "30");
//! engine.validate("POST /age", &mut props).unwrap();
//! assert_eq!(props.value("age").and_then(|v| v.as_i64()), Some(30));
//! ```

#![doc(html_root_url = "https://docs.rs/kanon-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fixtures;
mod props;

pub use props::{AuthPolicy, MapProps};
