//! Inclusion validation of stored state values.

use crate::core::{AttributeSpec, StateName, DEFAULT_INVALID_MESSAGE};
use crate::executor::Stateful;
use crate::registry::TypeRegistry;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A stored value that is not one of its attribute's leaf states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{attribute} {message}")]
pub struct InclusionError {
    pub attribute: String,
    pub value: Option<StateName>,
    pub message: String,
}

/// Check one value against an attribute's leaves and options.
pub fn check_inclusion(
    spec: &AttributeSpec,
    value: Option<&StateName>,
) -> Validation<(), NonEmptyVec<InclusionError>> {
    let included = match value {
        Some(value) => spec.values().contains(value),
        None => spec.options().allow_nil,
    };

    if included {
        Validation::success(())
    } else {
        Validation::fail(InclusionError {
            attribute: spec.name().to_string(),
            value: value.cloned(),
            message: spec
                .options()
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_INVALID_MESSAGE.to_string()),
        })
    }
}

impl<H: Stateful> TypeRegistry<H> {
    /// Validate every attribute of `host`, accumulating all failures.
    pub fn validate(&self, host: &H) -> Validation<(), NonEmptyVec<InclusionError>> {
        let values = host.state_values();
        let checks: Vec<Validation<(), NonEmptyVec<InclusionError>>> = self
            .attributes
            .iter()
            .map(|spec| check_inclusion(spec, values.get(spec.name())))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AttributeBuilder;
    use crate::executor::StateValues;
    use crate::states;

    fn registry() -> TypeRegistry<StateValues> {
        TypeRegistry::builder()
            .attribute(
                AttributeBuilder::new("state")
                    .default_state("draft")
                    .states(states! {
                        draft => beta,
                        beta => { needs_feedback => draft },
                    }),
            )
            .unwrap()
            .attribute(
                AttributeBuilder::new("merge_status")
                    .default_state("na")
                    .allow_nil(true)
                    .message("is not a merge status")
                    .states(states! { na => pending, pending => na }),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn defaults_are_valid() {
        let registry = registry();
        let values = registry.new_values();
        assert!(registry.validate(&values).is_success());
    }

    #[test]
    fn group_names_are_not_assignable() {
        let registry = registry();
        let mut values = registry.new_values();
        values.set("state", Some("beta".into()));

        match registry.validate(&values) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                let error = errors.iter().next().unwrap();
                assert_eq!(error.attribute, "state");
                assert_eq!(error.value.as_ref().unwrap(), "beta");
                assert_eq!(error.to_string(), "state has invalid value");
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn failures_accumulate_across_attributes() {
        let registry = registry();
        let mut values = registry.new_values();
        values.set("state", None);
        values.set("merge_status", Some("merged".into()));

        match registry.validate(&values) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| e.attribute == "state" && e.value.is_none()));
                assert!(errors
                    .iter()
                    .any(|e| e.message == "is not a merge status"));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn missing_value_allowed_with_allow_nil() {
        let registry = registry();
        let mut values = registry.new_values();
        values.set("merge_status", None);
        assert!(registry.validate(&values).is_success());
    }
}
