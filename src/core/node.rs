//! Compiled state nodes.
//!
//! A compiled attribute owns all of its nodes in a flat table. Nodes refer to
//! their parent and children by [`NodeId`], an index into that table, so the
//! tree has a single owner and no reference cycles.
//!
//! [`StateInfo`] is a borrowed view of one node together with the table it
//! lives in; it is what callers use to ask tree questions such as ancestry
//! and reachability.

use super::attribute::AttributeSpec;
use super::state::StateName;
use std::sync::OnceLock;
use thiserror::Error;

/// Index of a node inside its attribute's node table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in declaration (pre-order) order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape of a compiled node, decided once at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Assignable state with its raw declared targets, in declaration order.
    /// An empty list marks a terminal state.
    Leaf { targets: Vec<StateName> },

    /// Named grouping of child states. Never assignable.
    Group { children: Vec<NodeId> },
}

/// Asking a group node for its transitions.
///
/// Only leaves declare targets; a group has no transitions of its own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is a group state; only leaf states have transitions")]
pub struct NotALeaf(pub StateName);

/// A single compiled state.
#[derive(Debug)]
pub struct StateNode {
    pub(crate) name: StateName,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) flattened: OnceLock<Vec<StateName>>,
    pub(crate) transitions: OnceLock<Vec<StateName>>,
}

impl StateNode {
    pub(crate) fn leaf(name: StateName, parent: Option<NodeId>, targets: Vec<StateName>) -> Self {
        Self {
            name,
            parent,
            kind: NodeKind::Leaf { targets },
            flattened: OnceLock::new(),
            transitions: OnceLock::new(),
        }
    }

    pub(crate) fn group(name: StateName, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            kind: NodeKind::Group {
                children: Vec::new(),
            },
            flattened: OnceLock::new(),
            transitions: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &StateName {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Raw targets as declared; `None` for a group.
    pub fn raw_targets(&self) -> Option<&[StateName]> {
        match &self.kind {
            NodeKind::Leaf { targets } => Some(targets),
            NodeKind::Group { .. } => None,
        }
    }

    /// Child ids in declaration order; empty for a leaf.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Group { children } => children,
        }
    }
}

/// Borrowed view of one node of a compiled attribute.
///
/// # Example
///
/// ```rust
/// use statetree::builder::AttributeBuilder;
/// use statetree::states;
///
/// let spec = AttributeBuilder::new("state")
///     .default_state("draft")
///     .states(states! {
///         draft => beta,
///         beta => {
///             needs_feedback => [draft, needs_approval],
///             needs_approval => [draft, approved],
///         },
///         approved => retired,
///         retired => nil,
///     })
///     .build()
///     .unwrap();
///
/// let draft = spec.state("draft").unwrap();
/// assert_eq!(draft.to_transitions().unwrap(), ["needs_feedback", "needs_approval"]);
/// assert!(spec.state("needs_approval").unwrap().is("beta"));
/// ```
#[derive(Clone, Copy)]
pub struct StateInfo<'a> {
    spec: &'a AttributeSpec,
    id: NodeId,
}

impl<'a> StateInfo<'a> {
    pub(crate) fn new(spec: &'a AttributeSpec, id: NodeId) -> Self {
        Self { spec, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a StateNode {
        self.spec.node(self.id)
    }

    pub fn name(&self) -> &'a StateName {
        &self.node().name
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_group(&self) -> bool {
        self.node().is_group()
    }

    /// The enclosing group, if any.
    pub fn parent(&self) -> Option<StateInfo<'a>> {
        self.node().parent.map(|id| StateInfo::new(self.spec, id))
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = StateInfo<'a>> + 'a {
        let spec = self.spec;
        self.node()
            .children()
            .iter()
            .map(move |&id| StateInfo::new(spec, id))
    }

    /// True when this node is `name` or sits anywhere beneath the group
    /// called `name`.
    pub fn is(&self, name: &str) -> bool {
        let mut current = Some(*self);
        while let Some(info) = current {
            if info.name().as_str() == name {
                return true;
            }
            current = info.parent();
        }
        false
    }

    /// Concrete leaves reachable in one step, in declaration order.
    ///
    /// Each raw target is expanded to its leaves: a leaf target stands for
    /// itself, a group target for every leaf beneath it. Duplicates across
    /// targets are kept. The result is computed once per node.
    ///
    /// # Errors
    ///
    /// Returns [`NotALeaf`] when called on a group; groups cannot be the
    /// current state and have no transitions.
    pub fn to_transitions(&self) -> Result<&'a [StateName], NotALeaf> {
        let node = self.node();
        let NodeKind::Leaf { targets } = &node.kind else {
            return Err(NotALeaf(node.name.clone()));
        };
        let spec = self.spec;
        let transitions = node.transitions.get_or_init(|| {
            targets
                .iter()
                .filter_map(|target| spec.flatten(target.as_str()))
                .flat_map(|leaves| leaves.iter().cloned())
                .collect()
        });
        Ok(transitions)
    }

    /// Exact membership in [`to_transitions`](Self::to_transitions).
    ///
    /// Always false for a group node.
    pub fn can_transition_to(&self, name: &str) -> bool {
        self.to_transitions()
            .map(|targets| targets.iter().any(|t| t.as_str() == name))
            .unwrap_or(false)
    }

    /// A leaf with no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self.to_transitions(), Ok(targets) if targets.is_empty())
    }

    /// `[name]` for a leaf; for a group, the depth-first concatenation of
    /// its children's leaves in declaration order.
    pub fn collect_child_states(&self) -> Vec<StateName> {
        let mut states = Vec::new();
        self.collect_into(&mut states);
        states
    }

    fn collect_into(&self, states: &mut Vec<StateName>) {
        match &self.node().kind {
            NodeKind::Leaf { .. } => states.push(self.name().clone()),
            NodeKind::Group { .. } => {
                for child in self.children() {
                    child.collect_into(states);
                }
            }
        }
    }
}

impl std::fmt::Debug for StateInfo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateInfo")
            .field("attribute", &self.spec.name())
            .field("name", self.name())
            .field("kind", &self.node().kind)
            .finish()
    }
}

impl PartialEq for StateInfo<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.spec, other.spec) && self.id == other.id
    }
}
