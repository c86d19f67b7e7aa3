//! Builder for compiling state attributes.

use crate::builder::compiler;
use crate::builder::error::CompileError;
use crate::builder::spec::StatesSpec;
use crate::core::{AttributeOptions, AttributeSpec, StateName};

/// Fluent builder for a single state attribute.
///
/// # Example
///
/// ```rust
/// use statetree::builder::AttributeBuilder;
/// use statetree::states;
///
/// let merge_status = AttributeBuilder::new("merge_status")
///     .default_state("na")
///     .events(["merge", "approve_merge", "reject_merge"])
///     .states(states! {
///         na => pending,
///         pending => [approved, rejected],
///         approved => nil,
///         rejected => pending,
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(merge_status.values(), ["na", "pending", "approved", "rejected"]);
/// ```
#[derive(Clone, Debug)]
pub struct AttributeBuilder {
    name: String,
    default: Option<StateName>,
    events: Vec<String>,
    states: Option<StatesSpec>,
    options: AttributeOptions,
}

impl AttributeBuilder {
    /// Start a declaration for the attribute called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            events: Vec::new(),
            states: None,
            options: AttributeOptions::default(),
        }
    }

    /// Set the initial state (required). Must name a leaf.
    pub fn default_state(mut self, state: impl Into<StateName>) -> Self {
        self.default = Some(state.into());
        self
    }

    /// Attach event labels.
    pub fn events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Set the state tree (required).
    pub fn states(mut self, states: StatesSpec) -> Self {
        self.states = Some(states);
        self
    }

    /// Prefix for scope names.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    /// Let an empty value pass inclusion validation.
    pub fn allow_nil(mut self, allow: bool) -> Self {
        self.options.allow_nil = allow;
        self
    }

    /// Message reported by inclusion validation.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.options.message = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compile the declaration.
    pub fn build(self) -> Result<AttributeSpec, CompileError> {
        let default = self.default.ok_or_else(|| CompileError::MissingDefaultState {
            attribute: self.name.clone(),
        })?;
        let states = self.states.ok_or_else(|| CompileError::MissingStates {
            attribute: self.name.clone(),
        })?;

        compiler::compile(self.name, default, self.events, self.options, &states)
    }
}
