//! Builder for per-type registries.

use crate::builder::{AttributeBuilder, AttributeConfig, CompileError, StatesSpec};
use crate::core::{AttributeSpec, StateName, StateTransition};
use crate::executor::{Observer, Stateful};
use crate::persistence::{HookCallback, HookContext, LifecycleHook};
use crate::registry::type_registry::TypeRegistry;
use std::sync::Arc;

/// Collects the state attributes, observers and lifecycle callbacks of one
/// host type.
///
/// The builder is the registration phase: attributes are compiled as they
/// are added and observers are appended in order. [`build`](Self::build)
/// freezes everything into a [`TypeRegistry`].
///
/// # Example
///
/// ```rust
/// use statetree::executor::{StateValues, Stateful};
/// use statetree::registry::RegistryBuilder;
/// use statetree::states;
///
/// struct Kata {
///     states: StateValues,
///     state_changes: usize,
/// }
///
/// impl Stateful for Kata {
///     fn state_values(&self) -> &StateValues { &self.states }
///     fn state_values_mut(&mut self) -> &mut StateValues { &mut self.states }
/// }
///
/// let registry = RegistryBuilder::<Kata>::new()
///     .register("state", "draft", ["publish"], states! {
///         draft => published,
///         published => draft,
///     })
///     .unwrap()
///     .after_change(|kata, _| kata.state_changes += 1)
///     .build();
///
/// let mut kata = Kata { states: registry.new_values(), state_changes: 0 };
/// let state = registry.attribute("state").unwrap();
/// assert!(state.change(&mut kata, "published"));
/// assert_eq!(kata.state_changes, 1);
/// ```
pub struct RegistryBuilder<H> {
    attributes: Vec<Arc<AttributeSpec>>,
    observers: Vec<Observer<H>>,
    hooks: Vec<(LifecycleHook, HookCallback<H>)>,
}

impl<H: Stateful> RegistryBuilder<H> {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            observers: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Start a registry for a derived type from its parent's attributes.
    ///
    /// Compiled attributes are shared with the parent. Registering an
    /// attribute of the same name shadows the parent's definition in this
    /// registry only. Observers and lifecycle callbacks are typed by host
    /// and are not inherited.
    pub fn inherit<P>(parent: &TypeRegistry<P>) -> Self {
        Self {
            attributes: parent.attributes.clone(),
            observers: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Compile and store one state attribute.
    pub fn register<I>(
        self,
        name: impl Into<String>,
        default: impl Into<StateName>,
        events: I,
        states: StatesSpec,
    ) -> Result<Self, CompileError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.attribute(
            AttributeBuilder::new(name)
                .default_state(default)
                .events(events)
                .states(states),
        )
    }

    /// Compile and store an attribute declared with [`AttributeBuilder`].
    pub fn attribute(self, builder: AttributeBuilder) -> Result<Self, CompileError> {
        let spec = builder.build()?;
        Ok(self.register_spec(spec))
    }

    /// Compile and store an attribute declared as data.
    pub fn register_config(self, config: AttributeConfig) -> Result<Self, CompileError> {
        self.attribute(config.into_builder())
    }

    /// Store an already compiled attribute, replacing any attribute of the
    /// same name.
    pub fn register_spec(mut self, spec: AttributeSpec) -> Self {
        let spec = Arc::new(spec);
        match self
            .attributes
            .iter_mut()
            .find(|existing| existing.name() == spec.name())
        {
            Some(existing) => {
                tracing::debug!(attribute = spec.name(), "shadowing state attribute");
                *existing = spec;
            }
            None => {
                tracing::debug!(
                    attribute = spec.name(),
                    states = spec.len(),
                    "registered state attribute"
                );
                self.attributes.push(spec);
            }
        }
        self
    }

    /// Append an observer fired after every successful transition on any
    /// attribute of this type.
    pub fn after_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&mut H, &StateTransition) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Append a callback for a storage lifecycle hook.
    pub fn on_hook<F>(mut self, hook: LifecycleHook, callback: F) -> Self
    where
        F: Fn(&mut H, &HookContext) + Send + Sync + 'static,
    {
        self.hooks.push((hook, Arc::new(callback)));
        self
    }

    /// Freeze the registration phase.
    pub fn build(self) -> TypeRegistry<H> {
        TypeRegistry::new(self.attributes, self.observers, self.hooks)
    }
}

impl<H: Stateful> Default for RegistryBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
