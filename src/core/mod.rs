//! Core types of the compiled state graph.
//!
//! This module contains the immutable side of the engine:
//! - State names shared by declarations, nodes and instance values
//! - Compiled nodes and the borrowed [`StateInfo`] view
//! - Compiled attributes holding the node table
//! - Transition history records
//!
//! Nothing here mutates after compilation except the per-node memo cells
//! filled on first use.

mod attribute;
mod history;
mod node;
mod state;

pub use attribute::{AttributeOptions, AttributeSpec, DEFAULT_INVALID_MESSAGE};
pub use history::{StateHistory, StateTransition};
pub use node::{NodeId, NodeKind, NotALeaf, StateInfo, StateNode};
pub use state::StateName;
