//! The validator contract.

use std::sync::Arc;

use crate::{ErrorKind, Parameter, Value};

/// Outcome of checking one raw value.
///
/// `Ok(Some(value))` carries the coerced value, `Ok(None)` accepts the raw
/// string as-is, and `Err(kind)` rejects it.
pub type Verdict = Result<Option<Value>, ErrorKind>;

/// Checks and coerces a single raw value against one parameter.
///
/// Validators are pure: the same descriptor and raw value always produce the
/// same verdict. Any `Fn(&Parameter, &str) -> Verdict` closure is a validator.
///
/// # Example
///
/// ```
/// use kanon_core::{ErrorKind, Parameter, Validator, Value, Verdict};
///
/// let even = |_: &Parameter, raw: &str| -> Verdict {
///     match raw.parse::<i64>() {
///         Ok(n) if n % 2 == 0 => Ok(Some(Value::Integer(n))),
///         Ok(_) => Err(ErrorKind::custom("odd")),
///         Err(_) => Err(ErrorKind::Type),
///     }
/// };
///
/// let param = Parameter::new("n", "integer");
/// assert_eq!(even.validate(&param, "4"), Ok(Some(Value::Integer(4))));
/// assert_eq!(even.validate(&param, "3"), Err(ErrorKind::custom("odd")));
/// ```
pub trait Validator: Send + Sync {
    /// Checks `raw` against `param`.
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict;
}

impl<F> Validator for F
where
    F: Fn(&Parameter, &str) -> Verdict + Send + Sync,
{
    fn validate(&self, param: &Parameter, raw: &str) -> Verdict {
        self(param, raw)
    }
}

/// A validator shared between registry entries and composites.
pub type SharedValidator = Arc<dyn Validator>;
