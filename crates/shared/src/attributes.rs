use serde::{Deserialize, Serialize};

use sheetkeep_domain::{Attribute, AttributeDefinition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<AttributeData> for Attribute {
    fn from(data: AttributeData) -> Self {
        Attribute {
            key: data.key,
            name: data.name,
            value: data.value,
            description: data.description,
        }
    }
}

impl From<&Attribute> for AttributeData {
    fn from(attribute: &Attribute) -> Self {
        Self {
            key: attribute.key.clone(),
            name: attribute.name.clone(),
            value: attribute.value.clone(),
            description: attribute.description.clone(),
        }
    }
}

/// Group-level attribute definition. Definitions travel as an ordered array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinitionData {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_filtered: bool,
    #[serde(default)]
    pub known_values: Vec<String>,
}

impl From<AttributeDefinitionData> for AttributeDefinition {
    fn from(data: AttributeDefinitionData) -> Self {
        AttributeDefinition {
            key: data.key,
            name: data.name,
            description: data.description,
            is_filtered: data.is_filtered,
            known_values: data.known_values,
        }
    }
}

impl From<&AttributeDefinition> for AttributeDefinitionData {
    fn from(definition: &AttributeDefinition) -> Self {
        Self {
            key: definition.key.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            is_filtered: definition.is_filtered,
            known_values: definition.known_values.clone(),
        }
    }
}
