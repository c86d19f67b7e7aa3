//! Statetree: hierarchical state attributes for plain Rust types
//!
//! A host type declares one or more named state attributes. Each attribute
//! is a tree of leaf states (the only values an instance can hold) and
//! group states (named sets of leaves). A transition target may name a
//! group, in which case it stands for every leaf below it.
//!
//! # Core Concepts
//!
//! - **Compilation**: declarations are checked and compiled once into an
//!   immutable [`AttributeSpec`](core::AttributeSpec)
//! - **Registry**: a [`TypeRegistry`] holds every attribute of one host type
//!   and the observers shared by them
//! - **Execution**: lenient and strict transitions, optional side effects,
//!   then observers, all against any instance implementing [`Stateful`]
//! - **Persistence boundary**: tracked changes, lifecycle callbacks, query
//!   scopes and inclusion validation for a storage collaborator
//!
//! # Example
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use statetree::{states, Stateful, StateValues, TransitionError, TypeRegistry};
//!
//! struct Kata {
//!     states: StateValues,
//!     published_at: Option<DateTime<Utc>>,
//! }
//!
//! impl Stateful for Kata {
//!     fn state_values(&self) -> &StateValues { &self.states }
//!     fn state_values_mut(&mut self) -> &mut StateValues { &mut self.states }
//! }
//!
//! let registry = TypeRegistry::<Kata>::builder()
//!     .register("state", "draft", ["publish", "unpublish"], states! {
//!         draft => beta,
//!         beta => {
//!             needs_feedback => [draft, needs_approval],
//!             needs_approval => [draft, approved],
//!         },
//!         approved => retired,
//!         retired => nil,
//!     })
//!     .unwrap()
//!     .build();
//!
//! let mut kata = Kata { states: registry.new_values(), published_at: None };
//! let state = registry.attribute("state").unwrap();
//!
//! let published = state.change_strict_with(&mut kata, "needs_feedback", |kata| {
//!     kata.published_at = Some(Utc::now());
//!     Ok::<(), TransitionError>(())
//! });
//! assert_eq!(published, Ok(true));
//! assert!(state.is(&kata, "beta"));
//! assert!(kata.published_at.is_some());
//!
//! // "approved" is not reachable from "needs_feedback"
//! assert!(!state.change(&mut kata, "approved"));
//! ```

pub mod builder;
pub mod core;
pub mod executor;
pub mod persistence;
pub mod registry;

// Re-export commonly used types
pub use builder::{AttributeBuilder, AttributeConfig, CompileError, StatesSpec, TargetSpec};
pub use self::core::{AttributeSpec, StateHistory, StateInfo, StateName, StateTransition};
pub use executor::{StateValues, Stateful, TransitionError};
pub use persistence::{HookContext, InclusionError, LifecycleHook, Scope};
pub use registry::{Attribute, RegistryBuilder, RegistryError, TypeRegistry};
