//! Compiles a [`StatesSpec`] into an [`AttributeSpec`].
//!
//! Compilation walks the declaration once, assigning every node an id in
//! pre-order and registering its name in the flat index. A second pass
//! resolves raw leaf targets against the index and checks the default.

use crate::builder::error::CompileError;
use crate::builder::spec::{StatesSpec, TargetSpec};
use crate::core::{AttributeOptions, AttributeSpec, NodeId, NodeKind, StateName, StateNode};
use std::collections::HashMap;

pub(crate) fn compile(
    name: String,
    default: StateName,
    events: Vec<String>,
    options: AttributeOptions,
    states: &StatesSpec,
) -> Result<AttributeSpec, CompileError> {
    let mut compiler = Compiler {
        attribute: &name,
        nodes: Vec::new(),
        index: HashMap::new(),
        leaves: Vec::new(),
    };

    compiler.walk(states, None)?;
    compiler.resolve_targets()?;
    compiler.check_default(&default)?;

    let Compiler {
        nodes,
        index,
        leaves,
        ..
    } = compiler;

    tracing::trace!(
        attribute = %name,
        states = nodes.len(),
        leaves = leaves.len(),
        "compiled state attribute"
    );

    Ok(AttributeSpec {
        name,
        default,
        nodes,
        index,
        leaves,
        events,
        options,
    })
}

struct Compiler<'a> {
    attribute: &'a str,
    nodes: Vec<StateNode>,
    index: HashMap<StateName, NodeId>,
    leaves: Vec<StateName>,
}

impl Compiler<'_> {
    /// Compile one level of the declaration, returning the ids of its
    /// entries in order.
    fn walk(
        &mut self,
        states: &StatesSpec,
        parent: Option<NodeId>,
    ) -> Result<Vec<NodeId>, CompileError> {
        let mut ids = Vec::with_capacity(states.len());

        for (name, target) in states.iter() {
            let id = self.register(name)?;

            match target {
                TargetSpec::Group(children) => {
                    self.nodes.push(StateNode::group(name.clone(), parent));
                    let child_ids = self.walk(children, Some(id))?;
                    if let NodeKind::Group { children } = &mut self.nodes[id.0].kind {
                        *children = child_ids;
                    }
                }
                leaf => {
                    self.nodes
                        .push(StateNode::leaf(name.clone(), parent, leaf.targets()));
                    self.leaves.push(name.clone());
                }
            }

            ids.push(id);
        }

        Ok(ids)
    }

    fn register(&mut self, name: &StateName) -> Result<NodeId, CompileError> {
        if self.index.contains_key(name) {
            return Err(CompileError::DuplicateStateName {
                attribute: self.attribute.to_string(),
                name: name.clone(),
            });
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(name.clone(), id);
        Ok(id)
    }

    fn resolve_targets(&self) -> Result<(), CompileError> {
        for node in &self.nodes {
            let Some(targets) = node.raw_targets() else {
                continue;
            };
            if let Some(target) = targets.iter().find(|t| !self.index.contains_key(*t)) {
                return Err(CompileError::UnknownStateReference {
                    attribute: self.attribute.to_string(),
                    from: node.name().clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_default(&self, default: &StateName) -> Result<(), CompileError> {
        let is_leaf = self
            .index
            .get(default)
            .is_some_and(|id| self.nodes[id.0].is_leaf());
        if is_leaf {
            Ok(())
        } else {
            Err(CompileError::InvalidDefaultState {
                attribute: self.attribute.to_string(),
                name: default.clone(),
            })
        }
    }
}
