//! Declarative state trees.
//!
//! A [`StatesSpec`] is the uncompiled input: an ordered mapping from state
//! name to [`TargetSpec`]. It can be built in code, with the
//! [`states!`](crate::states) macro, or deserialized from JSON where each
//! value is `null`, a string, an array of strings, or a nested object.

use crate::core::StateName;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// What a declared state maps to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    /// Leaf with no outgoing transitions (`nil`).
    Terminal,

    /// Leaf with a single target.
    One(StateName),

    /// Leaf with several targets, in order.
    Many(Vec<StateName>),

    /// Group whose children are declared recursively.
    Group(StatesSpec),
}

impl TargetSpec {
    pub fn one(target: impl Into<StateName>) -> Self {
        Self::One(target.into())
    }

    pub fn many<I>(targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateName>,
    {
        Self::Many(targets.into_iter().map(Into::into).collect())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Raw targets of a leaf declaration; empty for terminals and groups.
    pub fn targets(&self) -> Vec<StateName> {
        match self {
            Self::Terminal | Self::Group(_) => Vec::new(),
            Self::One(target) => vec![target.clone()],
            Self::Many(targets) => targets.clone(),
        }
    }
}

impl From<&str> for TargetSpec {
    fn from(target: &str) -> Self {
        Self::One(target.into())
    }
}

impl From<StateName> for TargetSpec {
    fn from(target: StateName) -> Self {
        Self::One(target)
    }
}

impl<const N: usize> From<[&str; N]> for TargetSpec {
    fn from(targets: [&str; N]) -> Self {
        Self::many(targets)
    }
}

impl From<Vec<StateName>> for TargetSpec {
    fn from(targets: Vec<StateName>) -> Self {
        Self::Many(targets)
    }
}

impl From<StatesSpec> for TargetSpec {
    fn from(children: StatesSpec) -> Self {
        Self::Group(children)
    }
}

impl From<Option<StateName>> for TargetSpec {
    fn from(target: Option<StateName>) -> Self {
        target.map_or(Self::Terminal, Self::One)
    }
}

/// Ordered mapping of state name to declaration.
///
/// # Example
///
/// ```rust
/// use statetree::builder::{StatesSpec, TargetSpec};
///
/// let spec = StatesSpec::new()
///     .state("na", "pending")
///     .state("pending", ["approved", "rejected"])
///     .terminal("approved")
///     .state("rejected", "pending");
///
/// assert_eq!(spec.len(), 4);
/// assert_eq!(spec.get("approved"), Some(&TargetSpec::Terminal));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatesSpec {
    entries: Vec<(StateName, TargetSpec)>,
}

impl StatesSpec {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a state. Declaration order is kept.
    pub fn state(mut self, name: impl Into<StateName>, target: impl Into<TargetSpec>) -> Self {
        self.entries.push((name.into(), target.into()));
        self
    }

    /// Declare a leaf with no outgoing transitions.
    pub fn terminal(self, name: impl Into<StateName>) -> Self {
        self.state(name, TargetSpec::Terminal)
    }

    /// Declare a group of child states.
    pub fn group(self, name: impl Into<StateName>, children: StatesSpec) -> Self {
        self.state(name, TargetSpec::Group(children))
    }

    pub fn get(&self, name: &str) -> Option<&TargetSpec> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, target)| target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateName, &TargetSpec)> {
        self.entries.iter().map(|(name, target)| (name, target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StatesSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, target) in &self.entries {
            map.serialize_entry(name, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatesSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatesVisitor;

        impl<'de> Visitor<'de> for StatesVisitor {
            type Value = StatesSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of state names to targets")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StatesSpec, A::Error> {
                // entries are pushed as read so duplicate keys reach the compiler
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, target)) = access.next_entry::<StateName, TargetSpec>()? {
                    entries.push((name, target));
                }
                Ok(StatesSpec { entries })
            }
        }

        deserializer.deserialize_map(StatesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let spec = StatesSpec::new()
            .state("draft", "beta")
            .group(
                "beta",
                StatesSpec::new()
                    .state("needs_feedback", ["draft", "needs_approval"])
                    .state("needs_approval", ["draft", "approved"]),
            )
            .state("approved", "retired")
            .terminal("retired");

        let names: Vec<_> = spec.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["draft", "beta", "approved", "retired"]);
        assert!(spec.get("beta").unwrap().is_group());
    }

    #[test]
    fn targets_of_each_shape() {
        assert!(TargetSpec::Terminal.targets().is_empty());
        assert_eq!(TargetSpec::one("a").targets(), ["a"]);
        assert_eq!(TargetSpec::many(["a", "b"]).targets(), ["a", "b"]);
        assert!(TargetSpec::Group(StatesSpec::new()).targets().is_empty());
        assert_eq!(TargetSpec::from(None), TargetSpec::Terminal);
    }

    #[test]
    fn deserializes_all_four_shapes_in_order() {
        let json = r#"{
            "draft": "beta",
            "beta": {
                "needs_feedback": ["draft", "needs_approval"],
                "needs_approval": ["draft", "approved"]
            },
            "approved": "retired",
            "retired": null
        }"#;

        let spec: StatesSpec = serde_json::from_str(json).unwrap();
        let names: Vec<_> = spec.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["draft", "beta", "approved", "retired"]);

        assert_eq!(spec.get("draft"), Some(&TargetSpec::one("beta")));
        assert_eq!(spec.get("retired"), Some(&TargetSpec::Terminal));
        let Some(TargetSpec::Group(beta)) = spec.get("beta") else {
            panic!("beta should be a group");
        };
        assert_eq!(
            beta.get("needs_feedback"),
            Some(&TargetSpec::many(["draft", "needs_approval"]))
        );
    }

    #[test]
    fn serialization_preserves_shapes() {
        let spec = StatesSpec::new()
            .state("na", "pending")
            .state("pending", ["approved", "rejected"])
            .terminal("approved")
            .group("closed", StatesSpec::new().terminal("rejected"));

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(
            json,
            r#"{"na":"pending","pending":["approved","rejected"],"approved":null,"closed":{"rejected":null}}"#
        );

        let back: StatesSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn duplicate_json_keys_are_kept_for_the_compiler() {
        let spec: StatesSpec = serde_json::from_str(r#"{"a": null, "a": "b"}"#).unwrap();
        assert_eq!(spec.len(), 2);
    }
}
