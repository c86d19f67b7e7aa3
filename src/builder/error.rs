//! Errors raised while compiling state declarations.

use crate::core::StateName;
use thiserror::Error;

/// Errors that abort an attribute declaration.
///
/// All of these are detected once, when the declaration is compiled; a
/// compiled [`AttributeSpec`](crate::core::AttributeSpec) never produces them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("Attribute '{attribute}' declares state '{name}' more than once")]
    DuplicateStateName { attribute: String, name: StateName },

    #[error("State '{from}' of attribute '{attribute}' references unknown state '{target}'")]
    UnknownStateReference {
        attribute: String,
        from: StateName,
        target: StateName,
    },

    #[error("Default state '{name}' of attribute '{attribute}' is not a declared leaf state")]
    InvalidDefaultState { attribute: String, name: StateName },

    #[error("Default state not specified for attribute '{attribute}'. Call .default_state(name) before .build()")]
    MissingDefaultState { attribute: String },

    #[error("No states declared for attribute '{attribute}'. Call .states(spec) before .build()")]
    MissingStates { attribute: String },

    #[error("Invalid attribute declaration: {0}")]
    InvalidDeclaration(String),
}
