//! State names.
//!
//! Every state in a declaration, leaf or group, is identified by a
//! [`StateName`]. Names are immutable and cheap to clone so that compiled
//! graphs, per-instance values and history records can all hold them
//! without copying string data.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Immutable, symbol-like state identifier.
///
/// Leaves and groups share a single namespace within one attribute, so a
/// `StateName` is enough to find any node of a compiled tree.
///
/// # Example
///
/// ```rust
/// use statetree::core::StateName;
///
/// let draft = StateName::from("draft");
/// assert_eq!(draft.as_str(), "draft");
/// assert_eq!(draft, "draft");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateName(Arc<str>);

impl StateName {
    /// Create a state name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for StateName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StateName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Debug for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&StateName> for StateName {
    fn from(name: &StateName) -> Self {
        name.clone()
    }
}

impl PartialEq<str> for StateName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for StateName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn names_compare_by_content() {
        let a = StateName::from("draft");
        let b = StateName::new(String::from("draft"));

        assert_eq!(a, b);
        assert_ne!(a, StateName::from("retired"));
        assert_eq!(a, "draft");
    }

    #[test]
    fn clones_share_storage() {
        let a = StateName::from("beta");
        let b = a.clone();

        assert!(Arc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn lookup_by_str_through_borrow() {
        let mut map = HashMap::new();
        map.insert(StateName::from("pending"), 1);

        assert_eq!(map.get("pending"), Some(&1));
        assert_eq!(map.get("approved"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let name = StateName::from("needs_feedback");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"needs_feedback\"");

        let back: StateName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn debug_renders_symbol_style() {
        assert_eq!(format!("{:?}", StateName::from("na")), ":na");
        assert_eq!(StateName::from("na").to_string(), "na");
    }
}
