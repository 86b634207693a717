use std::borrow::Cow;
use std::cell::Cell;
use std::collections::HashMap;

use indexmap::IndexMap;
use kanon_core::{Action, Parameter, Props, Value};

/// How [`MapProps`] answers the authorization gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Every action is authorized.
    #[default]
    AllowAll,
    /// No action is authorized.
    DenyAll,
    /// Authorized if the action declares no requirement, or if every scope
    /// of at least one of its requirements is granted.
    Scopes(Vec<String>),
}

/// In-memory request properties.
///
/// Raw values are looked up by parameter name. Every call to `get` is
/// counted and every `set` is recorded in order.
#[derive(Debug, Default)]
pub struct MapProps {
    raw: HashMap<String, String>,
    written: IndexMap<String, Value>,
    reads: Cell<usize>,
    authorizations: Cell<usize>,
    policy: AuthPolicy,
}

impl MapProps {
    /// Empty props that authorize everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.raw.insert(name.into(), raw.into());
        self
    }

    /// Denies every action.
    #[must_use]
    pub fn deny_all(mut self) -> Self {
        self.policy = AuthPolicy::DenyAll;
        self
    }

    /// Grants the given scopes and nothing else.
    #[must_use]
    pub fn grant<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy = AuthPolicy::Scopes(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets or replaces a raw value in place.
    pub fn set_raw(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.raw.insert(name.into(), raw.into());
    }

    /// The value written for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.written.get(name)
    }

    /// Every written value, in write order.
    pub fn written(&self) -> &IndexMap<String, Value> {
        &self.written
    }

    /// Number of raw value reads so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of authorization calls so far.
    pub fn authorizations(&self) -> usize {
        self.authorizations.get()
    }

    /// The authorization policy.
    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    /// Forgets written values and counters, keeping raw values and policy.
    pub fn reset(&mut self) {
        self.written.clear();
        self.reads.set(0);
        self.authorizations.set(0);
    }
}

impl Props for MapProps {
    fn get(&self, param: &Parameter) -> Option<Cow<'_, str>> {
        self.reads.set(self.reads.get() + 1);
        self.raw.get(&param.name).map(|raw| Cow::Borrowed(raw.as_str()))
    }

    fn set(&mut self, name: &str, value: Value) {
        self.written.insert(name.to_string(), value);
    }

    fn authorize(&self, action: &Action) -> bool {
        self.authorizations.set(self.authorizations.get() + 1);
        match &self.policy {
            AuthPolicy::AllowAll => true,
            AuthPolicy::DenyAll => false,
            AuthPolicy::Scopes(granted) => {
                !action.requires_authorization()
                    || action.security.iter().any(|requirement| {
                        requirement
                            .values()
                            .flatten()
                            .all(|scope| granted.contains(scope))
                    })
            }
        }
    }
}
