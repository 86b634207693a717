//! A process-wide engine, for hosts that want exactly one.
//!
//! The engine is configured first (ingest, register validators) and then
//! installed once. After installation it is read-only.
//!
//! ```
//! use kanon::engine::Engine;
//!
//! let engine = Engine::from_spec(br#"{"paths": {"/ping": {"get": {}}}}"#).unwrap();
//! kanon::global::install(engine).unwrap();
//!
//! assert!(kanon::global::engine().unwrap().action("GET /ping").is_some());
//! assert!(kanon::global::install(Engine::new()).is_err());
//! ```

use std::sync::OnceLock;

use kanon_core::{Outcome, Props, Rejection};
use kanon_engine::Engine;
use tracing::warn;

static ENGINE: OnceLock<Engine> = OnceLock::new();

/// Installs the process-wide engine.
///
/// # Errors
///
/// If an engine is already installed, returns the given one unchanged.
pub fn install(engine: Engine) -> Result<&'static Engine, Engine> {
    let mut slot = Some(engine);
    let installed = ENGINE.get_or_init(|| slot.take().unwrap_or_default());
    match slot {
        None => Ok(installed),
        Some(rejected) => Err(rejected),
    }
}

/// The installed engine, if any.
pub fn engine() -> Option<&'static Engine> {
    ENGINE.get()
}

/// Returns true once an engine has been installed.
pub fn is_installed() -> bool {
    ENGINE.get().is_some()
}

/// Validates against the installed engine.
///
/// Before installation every action is unknown.
pub fn validate<P: Props + ?Sized>(action_id: &str, props: &mut P) -> Outcome {
    match ENGINE.get() {
        Some(engine) => engine.validate(action_id, props),
        None => {
            warn!(action = action_id, "validation before a global engine was installed");
            Err(Rejection::unknown_action(action_id))
        }
    }
}
