//! Transition errors and observer callbacks.

use crate::core::{StateName, StateTransition};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a strict transition is refused.
///
/// The lenient API reports every one of these as `false`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("Attribute '{attribute}' has no state named '{target}'")]
    UnknownStateReference { attribute: String, target: String },

    #[error("'{target}' is a group state of attribute '{attribute}' and cannot be assigned")]
    NotALeafState { attribute: String, target: StateName },

    #[error(
        "Attribute '{attribute}' cannot transition from '{}' to '{to}'",
        .from.as_ref().map_or("nil", StateName::as_str)
    )]
    IllegalTransition {
        attribute: String,
        from: Option<StateName>,
        to: StateName,
    },
}

/// Callback invoked after every successful transition on any attribute of a
/// host type. Receives the host and the transition just performed.
pub type Observer<H> = Arc<dyn Fn(&mut H, &StateTransition) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_attribute_and_states() {
        let unknown = TransitionError::UnknownStateReference {
            attribute: "state".into(),
            target: "retire".into(),
        };
        assert_eq!(unknown.to_string(), "Attribute 'state' has no state named 'retire'");

        let group = TransitionError::NotALeafState {
            attribute: "state".into(),
            target: "beta".into(),
        };
        assert_eq!(
            group.to_string(),
            "'beta' is a group state of attribute 'state' and cannot be assigned"
        );

        let illegal = TransitionError::IllegalTransition {
            attribute: "state".into(),
            from: Some("draft".into()),
            to: "retired".into(),
        };
        assert_eq!(
            illegal.to_string(),
            "Attribute 'state' cannot transition from 'draft' to 'retired'"
        );

        let from_nil = TransitionError::IllegalTransition {
            attribute: "state".into(),
            from: None,
            to: "draft".into(),
        };
        assert_eq!(
            from_nil.to_string(),
            "Attribute 'state' cannot transition from 'nil' to 'draft'"
        );
    }
}
