//! Category schema wire shapes

use serde::{Deserialize, Serialize};

use sheetkeep_domain::{CategoryKey, CategoryNode, FieldKey, TemplateSchema};

/// Persisted form of a template's category schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSchemaData {
    #[serde(default)]
    pub categories: Vec<CategoryNodeData>,
}

/// One category node. `key` may be absent on nodes created client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryNodeData>>,
}

impl TemplateSchemaData {
    pub fn into_domain(self) -> TemplateSchema {
        TemplateSchema::new(
            self.categories
                .into_iter()
                .map(CategoryNodeData::into_domain)
                .collect(),
        )
    }

    pub fn from_domain(schema: &TemplateSchema) -> Self {
        Self {
            categories: schema.categories.iter().map(CategoryNodeData::from).collect(),
        }
    }
}

impl CategoryNodeData {
    /// Convert to a domain node, generating keys for key-less nodes.
    pub fn into_domain(self) -> CategoryNode {
        let key = match self.key {
            Some(key) if !key.trim().is_empty() => CategoryKey::from(key),
            _ => CategoryKey::generate(),
        };
        CategoryNode {
            key,
            name: self.name,
            fields: self.fields.into_iter().map(FieldKey::from).collect(),
            categories: self
                .categories
                .unwrap_or_default()
                .into_iter()
                .map(CategoryNodeData::into_domain)
                .collect(),
        }
    }
}

impl From<&CategoryNode> for CategoryNodeData {
    fn from(node: &CategoryNode) -> Self {
        Self {
            key: Some(node.key.to_string()),
            name: node.name.clone(),
            fields: node.fields.iter().map(ToString::to_string).collect(),
            categories: (!node.categories.is_empty())
                .then(|| node.categories.iter().map(CategoryNodeData::from).collect()),
        }
    }
}
