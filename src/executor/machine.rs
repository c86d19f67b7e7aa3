//! Executes transitions on one (instance, attribute) pair.

use crate::core::{AttributeSpec, StateInfo, StateName, StateTransition};
use crate::executor::transition::{Observer, TransitionError};
use crate::executor::values::Stateful;
use chrono::Utc;
use std::marker::PhantomData;

/// Validates and performs transitions of one attribute.
///
/// Every entry point follows the same order: a same-state request is a
/// no-op returning `false`; otherwise the target must name a known leaf
/// reachable from the current state. On success the new value is stored,
/// the side effect (if any) runs, every observer is called in registration
/// order, and the call returns `true`.
///
/// The strict entry points report refusals as [`TransitionError`]; the
/// lenient ones return `false`. Side-effect errors propagate unchanged
/// from both.
pub struct TransitionExecutor<'r, H> {
    spec: &'r AttributeSpec,
    observers: &'r [Observer<H>],
    _host: PhantomData<fn(&mut H)>,
}

impl<H> Clone for TransitionExecutor<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for TransitionExecutor<'_, H> {}

impl<'r, H> TransitionExecutor<'r, H> {
    pub fn new(spec: &'r AttributeSpec, observers: &'r [Observer<H>]) -> Self {
        Self {
            spec,
            observers,
            _host: PhantomData,
        }
    }

    pub fn spec(&self) -> &'r AttributeSpec {
        self.spec
    }
}

impl<'r, H: Stateful> TransitionExecutor<'r, H> {
    /// Raw current value.
    pub fn current<'h>(&self, host: &'h H) -> Option<&'h StateName> {
        host.state_values().get(self.spec.name())
    }

    /// Node for the current value, if it names any node.
    pub fn info(&self, host: &H) -> Option<StateInfo<'r>> {
        self.current(host)
            .and_then(|name| self.spec.state(name.as_str()))
    }

    /// True when the current value names a declared leaf.
    pub fn is_valid(&self, host: &H) -> bool {
        self.info(host).is_some_and(|info| info.is_leaf())
    }

    /// True when `target` is one of the current state's transitions.
    pub fn can_transition_to(&self, host: &H, target: &str) -> bool {
        self.info(host)
            .is_some_and(|info| info.can_transition_to(target))
    }

    /// Lenient transition: `false` for a same-state request or any refusal.
    pub fn change(&self, host: &mut H, target: &str) -> bool {
        match self.check(host, target) {
            Ok(Some(target)) => {
                let transition = self.apply(host, target);
                self.notify(host, &transition);
                true
            }
            Ok(None) => false,
            Err(refused) => {
                tracing::trace!(error = %refused, "transition refused");
                false
            }
        }
    }

    /// Lenient transition with a side effect run after the value changes.
    ///
    /// The side effect runs only when the transition succeeds; its error is
    /// returned as-is and observers are skipped.
    pub fn change_with<E, F>(&self, host: &mut H, target: &str, side_effect: F) -> Result<bool, E>
    where
        F: FnOnce(&mut H) -> Result<(), E>,
    {
        match self.check(host, target) {
            Ok(Some(target)) => self.run(host, target, side_effect),
            Ok(None) => Ok(false),
            Err(refused) => {
                tracing::trace!(error = %refused, "transition refused");
                Ok(false)
            }
        }
    }

    /// Strict transition: `Ok(false)` for a same-state request, an error
    /// for an unknown, group or unreachable target.
    pub fn change_strict(&self, host: &mut H, target: &str) -> Result<bool, TransitionError> {
        match self.check(host, target) {
            Ok(Some(target)) => {
                let transition = self.apply(host, target);
                self.notify(host, &transition);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(refused) => {
                tracing::warn!(error = %refused, "strict transition refused");
                Err(refused)
            }
        }
    }

    /// Strict transition with a side effect. Refusals are converted into the
    /// side effect's error type.
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
        match self.check(host, target) {
            Ok(Some(target)) => self.run(host, target, side_effect),
            Ok(None) => Ok(false),
            Err(refused) => {
                tracing::warn!(error = %refused, "strict transition refused");
                Err(refused.into())
            }
        }
    }

    /// `Ok(None)` for a same-state request, `Ok(Some(leaf))` when the
    /// transition may proceed.
    fn check(&self, host: &H, target: &str) -> Result<Option<StateName>, TransitionError> {
        let current = self.current(host);
        if current.is_some_and(|name| name.as_str() == target) {
            return Ok(None);
        }

        let attribute = self.spec.name();
        let info = self
            .spec
            .state(target)
            .ok_or_else(|| TransitionError::UnknownStateReference {
                attribute: attribute.to_string(),
                target: target.to_string(),
            })?;

        if info.is_group() {
            return Err(TransitionError::NotALeafState {
                attribute: attribute.to_string(),
                target: info.name().clone(),
            });
        }

        // a missing, unknown or group current value has no outgoing edges
        let reachable = current
            .and_then(|name| self.spec.state(name.as_str()))
            .is_some_and(|from| from.can_transition_to(target));
        if !reachable {
            return Err(TransitionError::IllegalTransition {
                attribute: attribute.to_string(),
                from: current.cloned(),
                to: info.name().clone(),
            });
        }

        Ok(Some(info.name().clone()))
    }

    fn run<E, F>(&self, host: &mut H, target: StateName, side_effect: F) -> Result<bool, E>
    where
        F: FnOnce(&mut H) -> Result<(), E>,
    {
        let transition = self.apply(host, target);
        side_effect(host)?;
        self.notify(host, &transition);
        Ok(true)
    }

    fn apply(&self, host: &mut H, target: StateName) -> StateTransition {
        let attribute = self.spec.name();
        let values = host.state_values_mut();
        let from = values.set(attribute, Some(target.clone()));
        let transition = StateTransition {
            attribute: attribute.to_string(),
            from,
            to: target,
            timestamp: Utc::now(),
        };
        values.record(transition.clone());

        tracing::debug!(
            attribute,
            from = transition.from.as_ref().map_or("nil", StateName::as_str),
            to = %transition.to,
            "state transition"
        );
        transition
    }

    fn notify(&self, host: &mut H, transition: &StateTransition) {
        for observer in self.observers {
            observer(host, transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AttributeBuilder;
    use crate::executor::StateValues;
    use crate::states;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn kata_state() -> AttributeSpec {
        AttributeBuilder::new("state")
            .default_state("draft")
            .states(states! {
                draft => beta,
                beta => {
                    needs_feedback => [draft, needs_approval],
                    needs_approval => [draft, approved],
                },
                approved => retired,
                retired => nil,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn same_state_is_a_silent_no_op() {
        let spec = kata_state();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let observers: Vec<Observer<StateValues>> = vec![Arc::new(move |_: &mut StateValues, _: &StateTransition| {
            counter.fetch_add(1, Ordering::SeqCst);
        })];
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        assert!(!executor.change(&mut values, "draft"));
        assert_eq!(executor.change_strict(&mut values, "draft"), Ok(false));
        let result: Result<bool, TransitionError> =
            executor.change_strict_with(&mut values, "draft", |_| panic!("side effect ran"));
        assert_eq!(result, Ok(false));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(values.history().is_empty());
    }

    #[test]
    fn strict_refusals_and_lenient_false() {
        let spec = kata_state();
        let observers: Vec<Observer<StateValues>> = Vec::new();
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        assert!(matches!(
            executor.change_strict(&mut values, "retire"),
            Err(TransitionError::UnknownStateReference { .. })
        ));
        assert!(matches!(
            executor.change_strict(&mut values, "beta"),
            Err(TransitionError::NotALeafState { .. })
        ));
        assert!(matches!(
            executor.change_strict(&mut values, "retired"),
            Err(TransitionError::IllegalTransition { .. })
        ));

        assert!(!executor.change(&mut values, "retire"));
        assert!(!executor.change(&mut values, "beta"));
        assert!(!executor.change(&mut values, "retired"));
        assert_eq!(values.get("state").unwrap(), "draft");
    }

    #[test]
    fn side_effect_runs_after_mutation_and_before_observers() {
        let spec = kata_state();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = Arc::clone(&order);
        let observers: Vec<Observer<StateValues>> = vec![Arc::new(move |values: &mut StateValues, _: &StateTransition| {
            seen.lock()
                .unwrap()
                .push(format!("observer saw {}", values.get("state").unwrap()));
        })];
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        let changed = executor
            .change_with(&mut values, "needs_feedback", |values| {
                order
                    .lock()
                    .unwrap()
                    .push(format!("effect saw {}", values.get("state").unwrap()));
                Ok::<_, TransitionError>(())
            })
            .unwrap();

        assert!(changed);
        assert_eq!(
            *order.lock().unwrap(),
            ["effect saw needs_feedback", "observer saw needs_feedback"]
        );
    }

    #[test]
    fn side_effect_errors_propagate_and_skip_observers() {
        #[derive(Debug, PartialEq)]
        enum AppError {
            Transition(TransitionError),
            Effect(&'static str),
        }

        impl From<TransitionError> for AppError {
            fn from(e: TransitionError) -> Self {
                Self::Transition(e)
            }
        }

        let spec = kata_state();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let observers: Vec<Observer<StateValues>> = vec![Arc::new(move |_: &mut StateValues, _: &StateTransition| {
            counter.fetch_add(1, Ordering::SeqCst);
        })];
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        let result = executor.change_strict_with(&mut values, "needs_feedback", |_| {
            Err(AppError::Effect("boom"))
        });
        assert_eq!(result, Err(AppError::Effect("boom")));
        // the value was already stored when the side effect failed
        assert_eq!(values.get("state").unwrap(), "needs_feedback");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let lenient = executor.change_with(&mut values, "needs_approval", |_| {
            Err(AppError::Effect("lenient boom"))
        });
        assert_eq!(lenient, Err(AppError::Effect("lenient boom")));

        let refused = executor.change_strict_with(&mut values, "beta", |_| Ok::<_, AppError>(()));
        assert!(matches!(
            refused,
            Err(AppError::Transition(TransitionError::NotALeafState { .. }))
        ));
    }

    #[test]
    fn out_of_band_values_have_no_transitions() {
        let spec = kata_state();
        let observers: Vec<Observer<StateValues>> = Vec::new();
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        values.set("state", Some("beta".into()));
        assert!(!executor.is_valid(&values));
        assert!(!executor.can_transition_to(&values, "needs_feedback"));
        assert!(matches!(
            executor.change_strict(&mut values, "needs_feedback"),
            Err(TransitionError::IllegalTransition { .. })
        ));

        values.set("state", None);
        assert!(!executor.is_valid(&values));
        assert!(executor.info(&values).is_none());
        assert!(!executor.change(&mut values, "draft"));

        values.set("state", Some("bogus".into()));
        assert!(!executor.is_valid(&values));
    }

    #[test]
    fn successful_transitions_are_recorded() {
        let spec = kata_state();
        let observers: Vec<Observer<StateValues>> = Vec::new();
        let executor = TransitionExecutor::new(&spec, &observers);
        let mut values = StateValues::with_defaults([&spec]);

        assert!(executor.change(&mut values, "needs_feedback"));
        assert!(executor.change(&mut values, "needs_approval"));

        assert_eq!(
            values.history().path("state"),
            ["draft", "needs_feedback", "needs_approval"]
        );
    }
}
