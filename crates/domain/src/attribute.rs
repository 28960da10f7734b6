//! Free-form string attributes on items and skills, and their group-level
//! definitions.

use serde::{Deserialize, Serialize};

/// A named string tag attached to an item or skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub key: String,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    pub fn new(key: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            value: value.into(),
            description: None,
        }
    }

    /// Attribute whose key doubles as its display name.
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, value)
    }
}

/// Group-level metadata about an attribute.
///
/// The order of a definition list is meaningful: filtered definitions group
/// skills in the order they are defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_filtered: bool,
    /// Values seen so far, case-sensitive, in first-seen order
    #[serde(default)]
    pub known_values: Vec<String>,
}

impl AttributeDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
            is_filtered: false,
            known_values: Vec::new(),
        }
    }

    pub fn filtered(mut self) -> Self {
        self.is_filtered = true;
        self
    }

    /// Remember a value. Returns `true` if it was not known yet.
    pub fn record_value(&mut self, value: &str) -> bool {
        if value.is_empty() || self.known_values.iter().any(|known| known == value) {
            return false;
        }
        self.known_values.push(value.to_string());
        true
    }
}

/// Anything carrying an ordered attribute list.
pub trait Attributed {
    fn attributes(&self) -> &[Attribute];

    /// First attribute whose name matches.
    fn attribute_named(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|attr| attr.name == name)
    }

    /// First attribute whose key matches.
    fn attribute_keyed(&self, key: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|attr| attr.key == key)
    }
}

impl Attributed for Vec<Attribute> {
    fn attributes(&self) -> &[Attribute] {
        self
    }
}

impl<T: Attributed + ?Sized> Attributed for &T {
    fn attributes(&self) -> &[Attribute] {
        (**self).attributes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_value_is_case_sensitive_and_deduplicated() {
        let mut def = AttributeDefinition::new("elem", "Element").filtered();
        assert!(def.record_value("Fire"));
        assert!(!def.record_value("Fire"));
        assert!(def.record_value("fire"));
        assert!(!def.record_value(""));
        assert_eq!(def.known_values, vec!["Fire", "fire"]);
    }

    #[test]
    fn test_attribute_lookup() {
        let attrs = vec![
            Attribute::new("rar", "Rarity", "rare"),
            Attribute::new("rar2", "Rarity", "common"),
        ];
        assert_eq!(attrs.attribute_named("Rarity").unwrap().value, "rare");
        assert_eq!(attrs.attribute_keyed("rar2").unwrap().value, "common");
        assert!(attrs.attribute_named("Weight").is_none());
    }

    #[test]
    fn test_definition_defaults_from_json() {
        let def: AttributeDefinition =
            serde_json::from_str(r#"{"key":"elem","name":"Element"}"#).unwrap();
        assert!(!def.is_filtered);
        assert!(def.known_values.is_empty());
    }
}
