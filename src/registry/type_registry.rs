//! Frozen per-type registry.

use crate::core::AttributeSpec;
use crate::executor::{Observer, StateValues, Stateful, TransitionExecutor};
use crate::persistence::{HookCallback, LifecycleHook};
use crate::registry::builder::RegistryBuilder;
use crate::registry::error::RegistryError;
use crate::registry::handle::Attribute;
use std::sync::Arc;

/// Every state attribute of one host type, its after-change observers and
/// its lifecycle callbacks.
///
/// Immutable once built, so it can be shared across threads (for example in
/// a `static` initialised once, or behind an `Arc`).
pub struct TypeRegistry<H> {
    pub(crate) attributes: Vec<Arc<AttributeSpec>>,
    pub(crate) observers: Vec<Observer<H>>,
    pub(crate) hooks: Vec<(LifecycleHook, HookCallback<H>)>,
}

impl<H: Stateful> TypeRegistry<H> {
    pub fn builder() -> RegistryBuilder<H> {
        RegistryBuilder::new()
    }

    pub(crate) fn new(
        attributes: Vec<Arc<AttributeSpec>>,
        observers: Vec<Observer<H>>,
        hooks: Vec<(LifecycleHook, HookCallback<H>)>,
    ) -> Self {
        Self {
            attributes,
            observers,
            hooks,
        }
    }

    /// Handle for one attribute.
    pub fn attribute(&self, name: &str) -> Result<Attribute<'_, H>, RegistryError> {
        self.spec(name)
            .map(|spec| self.handle(spec))
            .ok_or_else(|| RegistryError::UnknownAttribute(name.to_string()))
    }

    /// Handles for every attribute in registration order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute<'_, H>> {
        self.attributes.iter().map(move |spec| self.handle(spec))
    }

    /// Compiled definition of one attribute.
    pub fn spec(&self, name: &str) -> Option<&Arc<AttributeSpec>> {
        self.attributes.iter().find(|spec| spec.name() == name)
    }

    /// Slots for a new instance with every attribute at its default.
    pub fn new_values(&self) -> StateValues {
        StateValues::with_defaults(self.attributes.iter().map(|spec| spec.as_ref()))
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn handle<'r>(&'r self, spec: &'r AttributeSpec) -> Attribute<'r, H> {
        Attribute::new(TransitionExecutor::new(spec, &self.observers))
    }
}

impl<H> std::fmt::Debug for TypeRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field(
                "attributes",
                &self.attributes.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("observers", &self.observers.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
