//! Built-in validators.
//!
//! The four primitives are selected by declared type. The format validators
//! and [`Composite`] are never selected automatically; register them by
//! parameter name or by model type.

mod composite;
mod format;
mod primitive;

pub use composite::Composite;
pub use format::{FormatValidator, EMAIL_PATTERN, ID_CARD_PATTERN, MOBILE_PATTERN};
pub use primitive::{BooleanValidator, IntegerValidator, NumberValidator, StringValidator};
