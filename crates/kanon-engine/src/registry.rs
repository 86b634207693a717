//! Validator override tables and resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use kanon_core::{ParamType, Parameter, SharedValidator, Validator};
use tracing::debug;

use crate::validators::{BooleanValidator, IntegerValidator, NumberValidator, StringValidator};

static STRING: StringValidator = StringValidator;
static INTEGER: IntegerValidator = IntegerValidator;
static NUMBER: NumberValidator = NumberValidator;
static BOOLEAN: BooleanValidator = BooleanValidator;

/// Where a parameter's validator came from.
#[derive(Clone, Copy)]
pub enum Resolution<'a> {
    /// Registered for the parameter's name.
    ByName(&'a dyn Validator),
    /// The built-in validator for a primitive type.
    Builtin(&'a dyn Validator),
    /// Registered for the parameter's model type.
    ByType(&'a dyn Validator),
    /// Nothing matched.
    Unresolved,
}

impl<'a> Resolution<'a> {
    /// The resolved validator, if any.
    pub fn validator(self) -> Option<&'a dyn Validator> {
        match self {
            Self::ByName(v) | Self::Builtin(v) | Self::ByType(v) => Some(v),
            Self::Unresolved => None,
        }
    }

    /// Short label for logs.
    pub const fn source(&self) -> &'static str {
        match self {
            Self::ByName(_) => "name",
            Self::Builtin(_) => "builtin",
            Self::ByType(_) => "type",
            Self::Unresolved => "unresolved",
        }
    }
}

impl fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

/// The two override tables, consulted before the built-ins.
///
/// Resolution precedence for a parameter:
///
/// 1. a validator registered under the parameter's name;
/// 2. the built-in validator for `string`, `integer`, `number` or `boolean`;
/// 3. a validator registered under the parameter's type name;
/// 4. nothing.
///
/// A per-type registration for a primitive name is stored but never reached.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    by_name: HashMap<String, SharedValidator>,
    by_type: HashMap<String, SharedValidator>,
}

impl ValidatorRegistry {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for every parameter called `name`. Last write wins.
    pub fn register_by_name(&mut self, name: impl Into<String>, validator: impl Validator + 'static) {
        self.register_shared_by_name(name, Arc::new(validator));
    }

    /// Registers an already shared validator by parameter name.
    pub fn register_shared_by_name(&mut self, name: impl Into<String>, validator: SharedValidator) {
        let name = name.into();
        debug!(parameter = %name, "validator registered by name");
        self.by_name.insert(name, validator);
    }

    /// Registers `validator` for every parameter whose declared type is
    /// `type_name`. Last write wins.
    pub fn register_by_type(
        &mut self,
        type_name: impl Into<String>,
        validator: impl Validator + 'static,
    ) {
        self.register_shared_by_type(type_name, Arc::new(validator));
    }

    /// Registers an already shared validator by model type.
    pub fn register_shared_by_type(
        &mut self,
        type_name: impl Into<String>,
        validator: SharedValidator,
    ) {
        let type_name = type_name.into();
        if ParamType::parse(&type_name).is_primitive() {
            debug!(type_name = %type_name, "model validator for a primitive type is shadowed by the built-in");
        } else {
            debug!(type_name = %type_name, "validator registered by type");
        }
        self.by_type.insert(type_name, validator);
    }

    /// Resolves the validator for `param`.
    pub fn resolve(&self, param: &Parameter) -> Resolution<'_> {
        if let Some(v) = self.by_name.get(&param.name) {
            return Resolution::ByName(v.as_ref());
        }
        match param.param_type() {
            ParamType::String => Resolution::Builtin(&STRING),
            ParamType::Integer => Resolution::Builtin(&INTEGER),
            ParamType::Number => Resolution::Builtin(&NUMBER),
            ParamType::Boolean => Resolution::Builtin(&BOOLEAN),
            ParamType::Model(name) => self
                .by_type
                .get(name)
                .map_or(Resolution::Unresolved, |v| Resolution::ByType(v.as_ref())),
        }
    }

    /// Number of name overrides.
    pub fn names_len(&self) -> usize {
        self.by_name.len()
    }

    /// Number of type overrides.
    pub fn types_len(&self) -> usize {
        self.by_type.len()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.by_name.keys().collect();
        let mut types: Vec<_> = self.by_type.keys().collect();
        names.sort();
        types.sort();
        f.debug_struct("ValidatorRegistry")
            .field("by_name", &names)
            .field("by_type", &types)
            .finish()
    }
}
