//! # Kanon Config
//!
//! Typed, layered configuration for Kanon.
//!
//! ## Layers
//!
//! 1. **Defaults** (or the `development()`/`production()` presets)
//! 2. **File**: TOML or JSON, chosen by extension
//! 3. **Environment**: `KANON__SECTION__KEY` overrides
//!
//! Unknown fields are rejected at every level.
//!
//! ## Example
//!
//! ```toml
//! [engine]
//! methods = ["GET", "POST", "DELETE"]
//! path_style = "colon"
//! unresolved = "skip"
//!
//! [spec]
//! path = "api/swagger.yaml"
//!
//! [telemetry.logging]
//! level = "info,kanon_engine=debug"
//! format = "json"
//!
//! [telemetry.metrics]
//! enabled = true
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `KANON__ENGINE__METHODS` | `engine.methods` (comma-separated) |
//! | `KANON__ENGINE__PATH_STYLE` | `engine.path_style` |
//! | `KANON__ENGINE__UNRESOLVED` | `engine.unresolved` |
//! | `KANON__SPEC__PATH` | `spec.path` |
//! | `KANON__TELEMETRY__LOGGING__LEVEL` | `telemetry.logging.level` |
//! | `KANON__TELEMETRY__LOGGING__FORMAT` | `telemetry.logging.format` |
//! | `KANON__TELEMETRY__METRICS__ENABLED` | `telemetry.metrics.enabled` |

#![doc(html_root_url = "https://docs.rs/kanon-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::KanonConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LoggingConfig, MetricsConfig, SpecConfig, TelemetrySection};
