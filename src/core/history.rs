//! State transition history tracking.
//!
//! Every transition performed through the executor is recorded on the
//! instance so callers can audit how each attribute moved over time.

use super::state::StateName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single successful transition.
///
/// # Example
///
/// ```rust
/// use statetree::core::{StateName, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     attribute: "state".to_string(),
///     from: Some(StateName::from("draft")),
///     to: StateName::from("needs_feedback"),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "needs_feedback");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The attribute that changed
    pub attribute: String,
    /// The value before the transition; `None` if the slot was empty
    pub from: Option<StateName>,
    /// The value after the transition
    pub to: StateName,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions across all attributes of one instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// States traversed by one attribute: the first recorded origin, then
    /// the target of each transition on that attribute.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statetree::core::{StateHistory, StateName, StateTransition};
    /// use chrono::Utc;
    ///
    /// let mut history = StateHistory::new();
    /// history.record(StateTransition {
    ///     attribute: "state".into(),
    ///     from: Some(StateName::from("draft")),
    ///     to: StateName::from("needs_feedback"),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// let path = history.path("state");
    /// assert_eq!(path.len(), 2);
    /// assert_eq!(path[0], "draft");
    /// ```
    pub fn path<'a>(&'a self, attribute: &'a str) -> Vec<&'a StateName> {
        let mut path = Vec::new();
        for (i, transition) in self.for_attribute(attribute).enumerate() {
            if let (0, Some(origin)) = (i, &transition.from) {
                path.push(origin);
            }
            path.push(&transition.to);
        }
        path
    }

    /// Transitions recorded for one attribute, oldest first.
    pub fn for_attribute<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a StateTransition> + 'a {
        self.transitions
            .iter()
            .filter(move |t| t.attribute == attribute)
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
