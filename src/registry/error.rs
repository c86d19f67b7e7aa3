//! Registry lookup errors.

use thiserror::Error;

/// Errors from looking up attributes on a [`TypeRegistry`](super::TypeRegistry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No state attribute named '{0}' is registered")]
    UnknownAttribute(String),
}
