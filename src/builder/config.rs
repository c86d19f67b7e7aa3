//! Attribute declarations as data.
//!
//! [`AttributeConfig`] is the serializable form of an attribute declaration,
//! so state machines can be declared in JSON alongside other configuration:
//!
//! ```json
//! {
//!   "name": "merge_status",
//!   "default": "na",
//!   "events": ["merge", "approve_merge", "reject_merge"],
//!   "prefix": "merge_status_",
//!   "states": {
//!     "na": "pending",
//!     "pending": ["approved", "rejected"],
//!     "approved": null,
//!     "rejected": "pending"
//!   }
//! }
//! ```

use crate::builder::attribute::AttributeBuilder;
use crate::builder::error::CompileError;
use crate::builder::spec::StatesSpec;
use crate::core::{AttributeSpec, StateName};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub name: String,
    pub default: StateName,
    #[serde(default)]
    pub events: Vec<String>,
    pub states: StatesSpec,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub allow_nil: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AttributeConfig {
    /// Parse a single attribute declaration from JSON.
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::InvalidDeclaration(e.to_string()))
    }

    /// Parse a list of attribute declarations from a JSON array.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::InvalidDeclaration(e.to_string()))
    }

    pub fn into_builder(self) -> AttributeBuilder {
        let mut builder = AttributeBuilder::new(self.name)
            .default_state(self.default)
            .events(self.events)
            .states(self.states)
            .prefix(self.prefix)
            .allow_nil(self.allow_nil);
        if let Some(message) = self.message {
            builder = builder.message(message);
        }
        builder
    }

    pub fn compile(self) -> Result<AttributeSpec, CompileError> {
        self.into_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERGE_STATUS: &str = r#"{
        "name": "merge_status",
        "default": "na",
        "events": ["merge", "approve_merge", "reject_merge"],
        "prefix": "merge_status_",
        "states": {
            "na": "pending",
            "pending": ["approved", "rejected"],
            "approved": null,
            "rejected": "pending"
        }
    }"#;

    #[test]
    fn json_declaration_compiles() {
        let spec = AttributeConfig::from_json(MERGE_STATUS)
            .unwrap()
            .compile()
            .unwrap();

        assert_eq!(spec.name(), "merge_status");
        assert_eq!(spec.values(), ["na", "pending", "approved", "rejected"]);
        assert_eq!(spec.options().prefix, "merge_status_");
        assert_eq!(
            spec.state("pending").unwrap().to_transitions().unwrap(),
            ["approved", "rejected"]
        );
    }

    #[test]
    fn optional_fields_default() {
        let config = AttributeConfig::from_json(
            r#"{"name": "state", "default": "on", "states": {"on": "off", "off": "on"}}"#,
        )
        .unwrap();

        assert!(config.events.is_empty());
        assert!(config.prefix.is_empty());
        assert!(!config.allow_nil);
        assert!(config.message.is_none());
    }

    #[test]
    fn malformed_json_is_an_invalid_declaration() {
        let result = AttributeConfig::from_json(r#"{"name": "state"}"#);
        assert!(matches!(result, Err(CompileError::InvalidDeclaration(_))));

        let result = AttributeConfig::from_json(r#"{"name": "s", "default": "a", "states": {"a": 3}}"#);
        assert!(matches!(result, Err(CompileError::InvalidDeclaration(_))));
    }

    #[test]
    fn list_of_declarations() {
        let json = format!("[{MERGE_STATUS}]");
        let configs = AttributeConfig::list_from_json(&json).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, "merge_status");
    }
}
