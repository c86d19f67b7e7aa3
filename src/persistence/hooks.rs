//! Storage lifecycle callbacks.

use crate::core::StateName;
use crate::executor::Stateful;
use crate::registry::TypeRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Points in a storage collaborator's save cycle at which state callbacks
/// can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleHook {
    Validate,
    BeforeSave,
    AfterSave,
    BeforeValidation,
    AfterValidation,
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::BeforeSave => "before_save",
            Self::AfterSave => "after_save",
            Self::BeforeValidation => "before_validation",
            Self::AfterValidation => "after_validation",
        };
        f.write_str(name)
    }
}

/// What a lifecycle callback is told about the change it runs for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookContext {
    pub attribute: String,
    pub hook: LifecycleHook,
    pub from: Option<StateName>,
    pub to: Option<StateName>,
}

/// Callback registered with [`RegistryBuilder::on_hook`](crate::registry::RegistryBuilder::on_hook).
pub type HookCallback<H> = Arc<dyn Fn(&mut H, &HookContext) + Send + Sync>;

impl<H: Stateful> TypeRegistry<H> {
    /// Run the callbacks registered for `hook` when an attribute moved from
    /// `old` to `new`.
    ///
    /// Nothing runs when the values are equal or the attribute is not
    /// registered. Returns whether any callback ran.
    pub fn process_transition(
        &self,
        host: &mut H,
        attribute: &str,
        hook: LifecycleHook,
        old: Option<&StateName>,
        new: Option<&StateName>,
    ) -> bool {
        if old == new || self.spec(attribute).is_none() {
            return false;
        }

        let context = HookContext {
            attribute: attribute.to_string(),
            hook,
            from: old.cloned(),
            to: new.cloned(),
        };

        let mut ran = false;
        for (_, callback) in self.hooks.iter().filter(|(h, _)| *h == hook) {
            callback(host, &context);
            ran = true;
        }

        if ran {
            tracing::debug!(
                attribute,
                hook = %hook,
                from = ?context.from,
                to = ?context.to,
                "ran lifecycle callbacks"
            );
        }
        ran
    }

    /// [`process_transition`](Self::process_transition) for every attribute
    /// with an uncommitted change. Returns how many attributes had callbacks
    /// run.
    pub fn process_transition_from_changes(&self, host: &mut H, hook: LifecycleHook) -> usize {
        let pending: Vec<(String, Option<StateName>, Option<StateName>)> = self
            .attributes
            .iter()
            .filter_map(|spec| {
                host.state_values()
                    .changes(spec.name())
                    .map(|(old, new)| (spec.name().to_string(), old.cloned(), new.cloned()))
            })
            .collect();

        let mut processed = 0;
        for (attribute, old, new) in &pending {
            if self.process_transition(host, attribute, hook, old.as_ref(), new.as_ref()) {
                processed += 1;
            }
        }
        processed
    }
}
