//! Category schema tree
//!
//! An ordered forest of categories, each claiming an ordered list of field
//! keys. The tree says nothing about which fields a record actually has;
//! resolving the two against each other happens in the engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keys::{CategoryKey, FieldKey};

/// Default nesting limit: root level plus one nested level.
pub const DEFAULT_MAX_CATEGORY_DEPTH: usize = 2;

/// Category schema owned by a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSchema {
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub key: CategoryKey,
    pub name: String,
    /// Claimed field keys, in display order
    #[serde(default)]
    pub fields: Vec<FieldKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(key: impl Into<CategoryKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            fields: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldKey>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: CategoryNode) -> Self {
        self.categories.push(category);
        self
    }

    /// Number of levels in this subtree, counting the node itself.
    pub fn subtree_depth(&self) -> usize {
        1 + self
            .categories
            .iter()
            .map(CategoryNode::subtree_depth)
            .max()
            .unwrap_or(0)
    }
}

impl TemplateSchema {
    pub fn new(categories: Vec<CategoryNode>) -> Self {
        Self { categories }
    }

    /// First node with `key` in depth-first order.
    pub fn find(&self, key: &str) -> Option<&CategoryNode> {
        find_in(&self.categories, key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut CategoryNode> {
        find_in_mut(&mut self.categories, key)
    }

    /// Number of nesting levels in use (0 for an empty schema).
    pub fn depth(&self) -> usize {
        self.categories
            .iter()
            .map(CategoryNode::subtree_depth)
            .max()
            .unwrap_or(0)
    }

    /// Level of the node with `key`, root nodes being level 1.
    pub fn level_of(&self, key: &str) -> Option<usize> {
        level_in(&self.categories, key, 1)
    }

    /// Every field key listed by any node.
    pub fn claimed_keys(&self) -> HashSet<&FieldKey> {
        let mut claimed = HashSet::new();
        collect_claimed(&self.categories, &mut claimed);
        claimed
    }
}

fn find_in<'a>(nodes: &'a [CategoryNode], key: &str) -> Option<&'a CategoryNode> {
    for node in nodes {
        if node.key.as_str() == key {
            return Some(node);
        }
        if let Some(found) = find_in(&node.categories, key) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [CategoryNode], key: &str) -> Option<&'a mut CategoryNode> {
    for node in nodes.iter_mut() {
        if node.key.as_str() == key {
            return Some(node);
        }
        if let Some(found) = find_in_mut(&mut node.categories, key) {
            return Some(found);
        }
    }
    None
}

fn level_in(nodes: &[CategoryNode], key: &str, level: usize) -> Option<usize> {
    for node in nodes {
        if node.key.as_str() == key {
            return Some(level);
        }
        if let Some(found) = level_in(&node.categories, key, level + 1) {
            return Some(found);
        }
    }
    None
}

fn collect_claimed<'a>(nodes: &'a [CategoryNode], claimed: &mut HashSet<&'a FieldKey>) {
    for node in nodes {
        claimed.extend(node.fields.iter());
        collect_claimed(&node.categories, claimed);
    }
}
