use std::fmt;
use std::sync::Arc;

use kanon_core::{Parameter, SharedValidator, Validator, Verdict};

/// Runs several validators over the same raw value, in order.
///
/// The first failure is returned unchanged. On success the value is the one
/// produced most recently by any step, so a later step that produces nothing
/// keeps an earlier step's coercion.
///
/// # Example
///
/// ```
/// use kanon_core::{ErrorKind, Parameter, Validator, Value};
/// use kanon_engine::validators::{Composite, FormatValidator, StringValidator};
///
/// let phone = Composite::new()
///     .then(StringValidator)
///     .then(FormatValidator::mobile());
///
/// let param = Parameter::new("phone", "string").max_length(11);
/// assert_eq!(
///     phone.validate(&param, "13800138000"),
///     Ok(Some(Value::String("13800138000".into())))
/// );
/// assert_eq!(phone.validate(&param, "12345"), Err(ErrorKind::Mobile));
/// ```
#[derive(Clone, Default)]
pub struct Composite {
    steps: Vec<SharedValidator>,
}

impl Composite {
    /// Creates an empty composite, which accepts everything and produces no
    /// value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    #[must_use]
    pub fn then(mut self, validator: impl Validator + 'static) -> Self {
        self.steps.push(Arc::new(validator));
        self
    }

    /// Appends an already shared step.
    #[must_use]
    pub fn then_shared(mut self, validator: SharedValidator) -> Self {
        self.steps.push(validator);
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl Validator for Composite {
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict {
        let mut produced = None;
        for step in &self.steps {
            if let Some(value) = step.validate(param, raw)? {
                produced = Some(value);
            }
        }
        Ok(produced)
    }
}
