//! Compiled state attributes.

use super::node::{NodeId, NodeKind, StateInfo, StateNode};
use super::state::StateName;
use std::collections::HashMap;

/// Default message reported when an attribute holds a value outside its
/// declared leaves.
pub const DEFAULT_INVALID_MESSAGE: &str = "has invalid value";

/// Options consumed by persistence collaborators. They do not affect
/// transition semantics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeOptions {
    /// Prepended to each state name to form scope names.
    pub prefix: String,
    /// A missing value passes inclusion validation.
    pub allow_nil: bool,
    /// Message for inclusion failures; `None` uses [`DEFAULT_INVALID_MESSAGE`].
    pub message: Option<String>,
}

/// The compiled, immutable definition of one named state machine.
///
/// Built once by [`AttributeBuilder`](crate::builder::AttributeBuilder) and
/// shared by every instance of the host type. Nodes live in a flat table in
/// declaration (pre-order) order; `index` maps every leaf and group name to
/// its node.
#[derive(Debug)]
pub struct AttributeSpec {
    pub(crate) name: String,
    pub(crate) default: StateName,
    pub(crate) nodes: Vec<StateNode>,
    pub(crate) index: HashMap<StateName, NodeId>,
    pub(crate) leaves: Vec<StateName>,
    pub(crate) events: Vec<String>,
    pub(crate) options: AttributeOptions,
}

impl AttributeSpec {
    /// Attribute name on the host type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial value for new instances. Always a leaf.
    pub fn default_state(&self) -> &StateName {
        &self.default
    }

    /// Event labels carried with the declaration. Opaque to the engine.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn options(&self) -> &AttributeOptions {
        &self.options
    }

    /// Assignable (leaf) state names in declaration order.
    pub fn values(&self) -> &[StateName] {
        &self.leaves
    }

    /// Look up any node, leaf or group, by name.
    pub fn state(&self, name: &str) -> Option<StateInfo<'_>> {
        self.index.get(name).map(|&id| StateInfo::new(self, id))
    }

    /// Every node, leaves and groups, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = StateInfo<'_>> {
        (0..self.nodes.len()).map(move |i| StateInfo::new(self, NodeId(i)))
    }

    /// Number of declared names, leaves and groups together.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_leaf(&self, name: &str) -> bool {
        self.state(name).is_some_and(|info| info.is_leaf())
    }

    /// Leaves with no outgoing transitions.
    pub fn terminal_states(&self) -> Vec<StateName> {
        self.leaves
            .iter()
            .filter(|name| self.state(name.as_str()).is_some_and(|info| info.is_terminal()))
            .cloned()
            .collect()
    }

    /// Leaves that `name` stands for: itself for a leaf, the ordered union of
    /// its children's leaves for a group. Memoized per node.
    pub fn flatten(&self, name: &str) -> Option<&[StateName]> {
        self.index
            .get(name)
            .map(|&id| self.flatten_node(id).as_slice())
    }

    fn flatten_node(&self, id: NodeId) -> &Vec<StateName> {
        let node = self.node(id);
        node.flattened.get_or_init(|| match &node.kind {
            NodeKind::Leaf { .. } => vec![node.name.clone()],
            NodeKind::Group { children } => {
                let mut leaves: Vec<StateName> = Vec::new();
                for &child in children {
                    for leaf in self.flatten_node(child) {
                        if !leaves.contains(leaf) {
                            leaves.push(leaf.clone());
                        }
                    }
                }
                leaves
            }
        })
    }

    pub(crate) fn node(&self, id: NodeId) -> &StateNode {
        &self.nodes[id.0]
    }
}
