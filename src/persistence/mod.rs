//! The seam between state attributes and a storage layer.
//!
//! Storage itself is out of scope. This module provides what a storage
//! collaborator needs to wire state attributes into its save cycle:
//!
//! - lifecycle callbacks driven by tracked changes ([`LifecycleHook`])
//! - query scopes for every leaf and group ([`Scope`])
//! - inclusion validation accumulated with `stillwater`'s `Validation`
//!   ([`InclusionError`])

mod hooks;
mod scope;
mod validation;

pub use hooks::{HookCallback, HookContext, LifecycleHook};
pub use scope::Scope;
pub use validation::{check_inclusion, InclusionError};
