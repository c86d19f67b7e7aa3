//! Query scopes derived from the state tree.

use crate::core::{AttributeSpec, StateName};
use serde::{Deserialize, Serialize};

/// A named filter over one attribute's stored values.
///
/// A leaf scope matches exactly that leaf; a group scope matches every leaf
/// below the group. Storage collaborators translate it into an equality or
/// membership query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub attribute: String,
    pub states: Vec<StateName>,
}

impl Scope {
    /// One scope per declared name, leaves and groups, in declaration order.
    pub fn all(spec: &AttributeSpec) -> Vec<Scope> {
        spec.states()
            .filter_map(|info| Self::for_state(spec, info.name().as_str()))
            .collect()
    }

    /// Scope named `prefix + state`, or `None` for an undeclared name.
    pub fn for_state(spec: &AttributeSpec, state: &str) -> Option<Scope> {
        let info = spec.state(state)?;
        Some(Scope {
            name: format!("{}{}", spec.options().prefix, info.name()),
            attribute: spec.name().to_string(),
            states: info.collect_child_states(),
        })
    }

    /// Whether a stored value falls inside the scope.
    pub fn matches(&self, value: Option<&StateName>) -> bool {
        value.is_some_and(|value| self.states.contains(value))
    }

    /// An equality filter rather than a membership filter.
    pub fn is_single(&self) -> bool {
        self.states.len() == 1
    }
}
