//! Per-instance state storage.

use crate::core::{AttributeSpec, StateHistory, StateName, StateTransition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Access to the state slots a host object carries.
///
/// Host types embed a [`StateValues`] and expose it through this trait; the
/// executor reads and writes slots only through it.
///
/// # Example
///
/// ```rust
/// use statetree::executor::{StateValues, Stateful};
///
/// struct Kata {
///     states: StateValues,
///     state_changes: usize,
/// }
///
/// impl Stateful for Kata {
///     fn state_values(&self) -> &StateValues {
///         &self.states
///     }
///
///     fn state_values_mut(&mut self) -> &mut StateValues {
///         &mut self.states
///     }
/// }
/// ```
pub trait Stateful {
    fn state_values(&self) -> &StateValues;

    fn state_values_mut(&mut self) -> &mut StateValues;
}

/// Current value of every state attribute on one host instance, plus the
/// values held at the last [`commit`](Self::commit) and the transition
/// history.
///
/// A slot holds `None` only when set that way out-of-band; the executor
/// always writes a leaf.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateValues {
    current: BTreeMap<String, Option<StateName>>,
    #[serde(default)]
    persisted: BTreeMap<String, Option<StateName>>,
    #[serde(default)]
    history: StateHistory,
}

impl StateValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots for a new instance, each set to its attribute's default.
    ///
    /// Nothing is committed yet, so every default shows up as a change until
    /// the first [`commit`](Self::commit).
    pub fn with_defaults<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = &'a AttributeSpec>,
    {
        let current = specs
            .into_iter()
            .map(|spec| (spec.name().to_string(), Some(spec.default_state().clone())))
            .collect();
        Self {
            current,
            persisted: BTreeMap::new(),
            history: StateHistory::new(),
        }
    }

    /// Raw current value of an attribute.
    pub fn get(&self, attribute: &str) -> Option<&StateName> {
        self.current.get(attribute).and_then(Option::as_ref)
    }

    /// Overwrite a slot without any validation, returning the old value.
    pub fn set(&mut self, attribute: &str, value: Option<StateName>) -> Option<StateName> {
        self.current
            .insert(attribute.to_string(), value)
            .flatten()
    }

    /// `(old, new)` when the attribute changed since the last commit.
    pub fn changes(&self, attribute: &str) -> Option<(Option<&StateName>, Option<&StateName>)> {
        let old = self.persisted.get(attribute).and_then(Option::as_ref);
        let new = self.get(attribute);
        (old != new).then_some((old, new))
    }

    /// Attributes with uncommitted changes, in name order.
    pub fn changed_attributes(&self) -> Vec<&str> {
        self.current
            .keys()
            .chain(self.persisted.keys())
            .map(String::as_str)
            .filter(|attribute| self.changes(attribute).is_some())
            .fold(Vec::new(), |mut names, name| {
                if !names.contains(&name) {
                    names.push(name);
                }
                names
            })
    }

    /// Value held at the last commit, if the attribute changed since.
    pub fn previous(&self, attribute: &str) -> Option<&StateName> {
        self.changes(attribute).and_then(|(old, _)| old)
    }

    /// Accept the current values as persisted, clearing tracked changes.
    pub fn commit(&mut self) {
        self.persisted = self.current.clone();
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub(crate) fn record(&mut self, transition: StateTransition) {
        self.history.record(transition);
    }
}

impl Stateful for StateValues {
    fn state_values(&self) -> &StateValues {
        self
    }

    fn state_values_mut(&mut self) -> &mut StateValues {
        self
    }
}
