//! Transition execution on host instances.
//!
//! This module is the mutable side of the engine. Host types carry a
//! [`StateValues`] and expose it through [`Stateful`]; a
//! [`TransitionExecutor`] binds one compiled attribute and the host type's
//! observers and performs transitions against any instance.
//!
//! # Key Concepts
//!
//! - **Lenient**: `change` / `change_with` return `false` on refusal
//! - **Strict**: `change_strict` / `change_strict_with` return a
//!   [`TransitionError`]
//! - **Side effects**: run after the value is stored, before observers
//! - **Observers**: type-wide callbacks fired after each successful change

mod machine;
mod transition;
mod values;

pub use machine::TransitionExecutor;
pub use transition::{Observer, TransitionError};
pub use values::{StateValues, Stateful};
