//! The caller capability.

use std::borrow::Cow;

use crate::{Action, Parameter, Value};

/// What the engine needs from its host for one request.
///
/// Any request or model representation can implement this. The engine reads
/// raw values through [`get`](Props::get), writes each coerced value back
/// through [`set`](Props::set), and trusts [`authorize`](Props::authorize)
/// to gate the whole action.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use std::collections::HashMap;
/// use kanon_core::{Action, Parameter, Props, Value};
///
/// struct Query {
///     raw: HashMap<String, String>,
///     typed: HashMap<String, Value>,
/// }
///
/// impl Props for Query {
///     fn get(&self, param: &Parameter) -> Option<Cow<'_, str>> {
///         self.raw.get(&param.name).map(|v| Cow::Borrowed(v.as_str()))
///     }
///
///     fn set(&mut self, name: &str, value: Value) {
///         self.typed.insert(name.to_string(), value);
///     }
///
///     fn authorize(&self, action: &Action) -> bool {
///         !action.requires_authorization()
///     }
/// }
/// ```
pub trait Props {
    /// Returns the raw value for `param`. `None` and `""` both mean absent.
    fn get(&self, param: &Parameter) -> Option<Cow<'_, str>>;

    /// Receives a successfully coerced value.
    fn set(&mut self, name: &str, value: Value);

    /// Decides whether the request may perform `action`, given its declared
    /// security requirements.
    fn authorize(&self, action: &Action) -> bool;
}

impl<P: Props + ?Sized> Props for &mut P {
    fn get(&self, param: &Parameter) -> Option<Cow<'_, str>> {
        (**self).get(param)
    }

    fn set(&mut self, name: &str, value: Value) {
        (**self).set(name, value);
    }

    fn authorize(&self, action: &Action) -> bool {
        (**self).authorize(action)
    }
}
