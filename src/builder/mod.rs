//! Declaration and compilation of state attributes.
//!
//! This module turns a nested, declaration-ordered state tree into an
//! immutable [`AttributeSpec`](crate::core::AttributeSpec). Declarations can
//! be written with the fluent [`StatesSpec`] builder, the
//! [`states!`](crate::states) macro, or loaded from JSON through
//! [`AttributeConfig`].

pub mod attribute;
mod compiler;
pub mod config;
pub mod error;
pub mod macros;
pub mod spec;

pub use attribute::AttributeBuilder;
pub use config::AttributeConfig;
pub use error::CompileError;
pub use spec::{StatesSpec, TargetSpec};
