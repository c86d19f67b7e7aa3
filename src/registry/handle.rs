//! Per-attribute handle.

use crate::core::{AttributeSpec, StateInfo, StateName};
use crate::executor::{Stateful, TransitionError, TransitionExecutor};
use crate::persistence::Scope;

/// Everything a host instance can do with one of its state attributes.
///
/// Obtained from [`TypeRegistry::attribute`](super::TypeRegistry::attribute).
/// The handle borrows the registry and is cheap to copy; the instance is
/// passed to each call.
pub struct Attribute<'r, H> {
    executor: TransitionExecutor<'r, H>,
}

impl<H> Clone for Attribute<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Attribute<'_, H> {}

impl<'r, H: Stateful> Attribute<'r, H> {
    pub(crate) fn new(executor: TransitionExecutor<'r, H>) -> Self {
        Self { executor }
    }

    pub fn name(&self) -> &'r str {
        self.executor.spec().name()
    }

    pub fn spec(&self) -> &'r AttributeSpec {
        self.executor.spec()
    }

    /// Assignable values in declaration order.
    pub fn values(&self) -> &'r [StateName] {
        self.spec().values()
    }

    /// Raw current value.
    pub fn get<'h>(&self, host: &'h H) -> Option<&'h StateName> {
        self.executor.current(host)
    }

    /// Overwrite the current value without validation or observers.
    pub fn set(&self, host: &mut H, value: impl Into<StateName>) -> Option<StateName> {
        host.state_values_mut()
            .set(self.name(), Some(value.into()))
    }

    /// Empty the slot without validation or observers.
    pub fn clear(&self, host: &mut H) -> Option<StateName> {
        host.state_values_mut().set(self.name(), None)
    }

    /// Node for the current value.
    pub fn info(&self, host: &H) -> Option<StateInfo<'r>> {
        self.executor.info(host)
    }

    /// True when the current state is `name` or lies inside group `name`.
    pub fn is(&self, host: &H, name: &str) -> bool {
        self.info(host).is_some_and(|info| info.is(name))
    }

    pub fn is_valid(&self, host: &H) -> bool {
        self.executor.is_valid(host)
    }

    pub fn can_transition_to(&self, host: &H, target: &str) -> bool {
        self.executor.can_transition_to(host, target)
    }

    pub fn change(&self, host: &mut H, target: &str) -> bool {
        self.executor.change(host, target)
    }

    pub fn change_with<E, F>(&self, host: &mut H, target: &str, side_effect: F) -> Result<bool, E>
    where
        F: FnOnce(&mut H) -> Result<(), E>,
    {
        self.executor.change_with(host, target, side_effect)
    }

    pub fn change_strict(&self, host: &mut H, target: &str) -> Result<bool, TransitionError> {
        self.executor.change_strict(host, target)
    }

    pub fn change_strict_with<E, F>(
        &self,
        host: &mut H,
        target: &str,
        side_effect: F,
    ) -> Result<bool, E>
    where
        E: From<TransitionError>,
        F: FnOnce(&mut H) -> Result<(), E>,
    {
        self.executor.change_strict_with(host, target, side_effect)
    }

    /// Value at the last commit, when it differs from the current one.
    pub fn previous<'h>(&self, host: &'h H) -> Option<&'h StateName> {
        host.state_values().previous(self.name())
    }

    pub fn previous_info(&self, host: &H) -> Option<StateInfo<'r>> {
        self.previous(host)
            .and_then(|name| self.spec().state(name.as_str()))
    }

    /// One query scope per leaf and group name.
    pub fn scopes(&self) -> Vec<Scope> {
        Scope::all(self.spec())
    }

    /// Scope for a single leaf or group name.
    pub fn scope(&self, state: &str) -> Option<Scope> {
        Scope::for_state(self.spec(), state)
    }
}

impl<H> std::fmt::Debug for Attribute<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.executor.spec().name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::executor::StateValues;
    use crate::registry::TypeRegistry;
    use crate::states;

    fn registry() -> TypeRegistry<StateValues> {
        TypeRegistry::builder()
            .register(
                "state",
                "draft",
                Vec::<String>::new(),
                states! {
                    draft => beta,
                    published => {
                        beta => {
                            needs_feedback => [draft, needs_approval],
                            needs_approval => [draft, approved],
                        },
                        approved => retired,
                    },
                    retired => nil,
                },
            )
            .unwrap()
            .build()
    }

    #[test]
    fn group_membership_helpers() {
        let registry = registry();
        let state = registry.attribute("state").unwrap();
        let mut values = registry.new_values();

        assert!(state.is(&values, "draft"));
        assert!(!state.is(&values, "published"));

        state.set(&mut values, "needs_feedback");
        assert!(state.is(&values, "published"));
        assert!(state.is(&values, "beta"));
        assert!(state.is(&values, "needs_feedback"));
        assert!(!state.is(&values, "draft"));
    }

    #[test]
    fn info_tracks_current_value() {
        let registry = registry();
        let state = registry.attribute("state").unwrap();
        let mut values = registry.new_values();

        assert_eq!(state.info(&values).unwrap().name(), "draft");
        state.change(&mut values, "needs_feedback");
        assert_eq!(state.info(&values).unwrap().name(), "needs_feedback");

        state.clear(&mut values);
        assert!(state.info(&values).is_none());
        assert!(!state.is_valid(&values));
    }

    #[test]
    fn previous_value_since_commit() {
        let registry = registry();
        let state = registry.attribute("state").unwrap();
        let mut values = registry.new_values();
        values.commit();

        assert!(state.previous(&values).is_none());
        state.change(&mut values, "needs_feedback");
        assert_eq!(state.previous(&values).unwrap(), "draft");
        assert_eq!(state.previous_info(&values).unwrap().name(), "draft");
    }

    #[test]
    fn values_exclude_groups() {
        let registry = registry();
        let state = registry.attribute("state").unwrap();

        assert_eq!(
            state.values(),
            ["draft", "needs_feedback", "needs_approval", "approved", "retired"]
        );
    }
}
