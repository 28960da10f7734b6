//! Resolver output types

use indexmap::IndexMap;
use serde::Serialize;

use sheetkeep_domain::{CategoryKey, CategoryNode, Field, FieldKey};

/// Resolution result keyed by top-level category key, in schema order.
/// The computed "other" bucket, when present, comes last.
pub type CategoryMap = IndexMap<CategoryKey, CategoryData>;

/// A field placed in a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedField {
    pub key: FieldKey,
    pub field: Field,
    /// `true` when the schema lists the field, `false` when only the field's
    /// own category hint (or nothing at all) put it here.
    pub is_static: bool,
}

/// A category node resolved against one record's fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub key: CategoryKey,
    pub name: String,
    pub fields: Vec<PlacedField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<CategoryData>,
}

impl CategoryData {
    pub fn new(key: CategoryKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            fields: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    pub(crate) fn place(&mut self, key: &FieldKey, field: &Field, is_static: bool) {
        self.fields.push(PlacedField {
            key: key.clone(),
            field: field.clone(),
            is_static,
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.subcategories.is_empty()
    }

    pub(crate) fn absorb(&mut self, other: CategoryData) {
        self.fields.extend(other.fields);
        self.subcategories.extend(other.subcategories);
    }

    /// Field keys of this node and all descendants, depth first.
    pub fn field_keys(&self) -> Vec<&FieldKey> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a FieldKey>) {
        keys.extend(self.fields.iter().map(|placed| &placed.key));
        for sub in &self.subcategories {
            sub.collect_keys(keys);
        }
    }

    /// Rebuild a persistable schema node, dropping field payloads and the
    /// static flag. Only the ordered key lists survive.
    pub fn to_schema_category(&self) -> CategoryNode {
        CategoryNode {
            key: self.key.clone(),
            name: self.name.clone(),
            fields: self.fields.iter().map(|placed| placed.key.clone()).collect(),
            categories: self
                .subcategories
                .iter()
                .map(CategoryData::to_schema_category)
                .collect(),
        }
    }
}

/// Every field key placed anywhere in a resolution result.
pub fn placed_field_keys(map: &CategoryMap) -> Vec<&FieldKey> {
    map.values().flat_map(CategoryData::field_keys).collect()
}
