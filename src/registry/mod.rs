//! Per-host-type attribute registries.
//!
//! A host type declares its state attributes once, through a
//! [`RegistryBuilder`], and shares the resulting [`TypeRegistry`] between
//! all of its instances. Instances never hold compiled state; they only
//! carry their current values, and every operation goes through an
//! [`Attribute`] handle borrowed from the registry.

mod builder;
mod error;
mod handle;
mod type_registry;

pub use builder::RegistryBuilder;
pub use error::RegistryError;
pub use handle::Attribute;
pub use type_registry::TypeRegistry;
