//! Structural edits on a template's category schema
//!
//! Depth limits live here, not in the resolver. Removing a category never
//! relocates its fields: they simply stop being claimed and the next
//! resolution places them by hint or in the "other" bucket.

use std::collections::HashSet;

use crate::category::{CategoryNode, TemplateSchema, DEFAULT_MAX_CATEGORY_DEPTH};
use crate::error::DomainError;
use crate::keys::{CategoryKey, FieldKey};
use crate::names::CategoryName;

/// Editor for a `TemplateSchema` enforcing the nesting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEditor {
    max_depth: usize,
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_CATEGORY_DEPTH,
        }
    }
}

impl SchemaEditor {
    /// A limit of 0 is treated as 1: root categories are always allowed.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Append a category to the root (`parent = None`) or to a parent's children.
    ///
    /// A node without a key gets a generated one. Returns the node's key.
    pub fn add_category(
        &self,
        schema: &mut TemplateSchema,
        parent: Option<&CategoryKey>,
        node: CategoryNode,
    ) -> Result<CategoryKey, DomainError> {
        self.insert_category(schema, parent, None, node)
    }

    /// Insert a category at `index` among its new siblings (`None` appends).
    pub fn insert_category(
        &self,
        schema: &mut TemplateSchema,
        parent: Option<&CategoryKey>,
        index: Option<usize>,
        mut node: CategoryNode,
    ) -> Result<CategoryKey, DomainError> {
        prepare_subtree(schema, &mut node, &mut HashSet::new())?;

        let parent_level = match parent {
            None => 0,
            Some(key) => schema
                .level_of(key.as_str())
                .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?,
        };
        let depth = parent_level + node.subtree_depth();
        if depth > self.max_depth {
            return Err(DomainError::depth_exceeded(depth, self.max_depth));
        }

        let siblings = match parent {
            None => &mut schema.categories,
            Some(key) => {
                &mut schema
                    .find_mut(key.as_str())
                    .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?
                    .categories
            }
        };
        let index = index.unwrap_or(siblings.len());
        if index > siblings.len() {
            return Err(DomainError::validation(format!(
                "Insert index {} out of range (0..={})",
                index,
                siblings.len()
            )));
        }
        let key = node.key.clone();
        siblings.insert(index, node);
        Ok(key)
    }

    /// Delete the category (and its subtree) with `key`.
    pub fn remove_category(
        &self,
        schema: &mut TemplateSchema,
        key: &CategoryKey,
    ) -> Result<CategoryNode, DomainError> {
        let siblings = siblings_containing(&mut schema.categories, key.as_str())
            .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?;
        let index = position(siblings, key)?;
        Ok(siblings.remove(index))
    }

    pub fn rename_category(
        &self,
        schema: &mut TemplateSchema,
        key: &CategoryKey,
        name: impl Into<String>,
    ) -> Result<(), DomainError> {
        let name = CategoryName::new(name)?;
        let node = schema
            .find_mut(key.as_str())
            .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?;
        node.name = name.into_inner();
        Ok(())
    }

    /// Swap with the previous sibling. No-op for the first sibling.
    pub fn move_category_up(
        &self,
        schema: &mut TemplateSchema,
        key: &CategoryKey,
    ) -> Result<(), DomainError> {
        let siblings = siblings_containing(&mut schema.categories, key.as_str())
            .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?;
        let index = position(siblings, key)?;
        if index > 0 {
            siblings.swap(index, index - 1);
        }
        Ok(())
    }

    /// Swap with the next sibling. No-op for the last sibling.
    pub fn move_category_down(
        &self,
        schema: &mut TemplateSchema,
        key: &CategoryKey,
    ) -> Result<(), DomainError> {
        let siblings = siblings_containing(&mut schema.categories, key.as_str())
            .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?;
        let index = position(siblings, key)?;
        if index + 1 < siblings.len() {
            siblings.swap(index, index + 1);
        }
        Ok(())
    }

    /// Move a category to `to_index` within its own sibling list.
    pub fn move_category(
        &self,
        schema: &mut TemplateSchema,
        key: &CategoryKey,
        to_index: usize,
    ) -> Result<(), DomainError> {
        let siblings = siblings_containing(&mut schema.categories, key.as_str())
            .ok_or_else(|| DomainError::not_found("Category", key.as_str()))?;
        if to_index >= siblings.len() {
            return Err(DomainError::validation(format!(
                "Move index {} out of range (0..{})",
                to_index,
                siblings.len()
            )));
        }
        let from = position(siblings, key)?;
        let node = siblings.remove(from);
        siblings.insert(to_index, node);
        Ok(())
    }

    /// Make `target` the only category claiming `field`.
    ///
    /// Every occurrence of the field is removed first, so repeating the move
    /// changes nothing. Targeting the reserved "other" key leaves the field
    /// unclaimed.
    pub fn move_field(
        &self,
        schema: &mut TemplateSchema,
        field: &FieldKey,
        target: &CategoryKey,
    ) -> Result<(), DomainError> {
        if !target.is_other() && schema.find(target.as_str()).is_none() {
            return Err(DomainError::not_found("Category", target.as_str()));
        }
        remove_field_everywhere(&mut schema.categories, field);
        if target.is_other() {
            return Ok(());
        }
        let node = schema
            .find_mut(target.as_str())
            .ok_or_else(|| DomainError::not_found("Category", target.as_str()))?;
        node.fields.push(field.clone());
        Ok(())
    }
}

/// Validate every node of a subtree about to be inserted, generating missing
/// keys. Keys must be new to the schema and unique within the subtree.
fn prepare_subtree(
    schema: &TemplateSchema,
    node: &mut CategoryNode,
    seen: &mut HashSet<CategoryKey>,
) -> Result<(), DomainError> {
    node.name = CategoryName::new(std::mem::take(&mut node.name))?.into_inner();
    if node.key.is_empty() {
        node.key = CategoryKey::generate();
    }
    if node.key.is_other() {
        return Err(DomainError::validation(format!(
            "Category key '{}' is reserved",
            node.key
        )));
    }
    if schema.find(node.key.as_str()).is_some() || !seen.insert(node.key.clone()) {
        return Err(DomainError::constraint(format!(
            "Category '{}' already exists",
            node.key
        )));
    }
    for child in &mut node.categories {
        prepare_subtree(schema, child, seen)?;
    }
    Ok(())
}

fn siblings_containing<'a>(
    nodes: &'a mut Vec<CategoryNode>,
    key: &str,
) -> Option<&'a mut Vec<CategoryNode>> {
    if nodes.iter().any(|node| node.key.as_str() == key) {
        return Some(nodes);
    }
    for node in nodes.iter_mut() {
        if let Some(found) = siblings_containing(&mut node.categories, key) {
            return Some(found);
        }
    }
    None
}

fn position(siblings: &[CategoryNode], key: &CategoryKey) -> Result<usize, DomainError> {
    siblings
        .iter()
        .position(|node| &node.key == key)
        .ok_or_else(|| DomainError::not_found("Category", key.as_str()))
}

fn remove_field_everywhere(nodes: &mut [CategoryNode], field: &FieldKey) {
    for node in nodes {
        node.fields.retain(|key| key != field);
        remove_field_everywhere(&mut node.categories, field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TemplateSchema {
        TemplateSchema::new(vec![
            CategoryNode::new("stats", "Stats")
                .with_fields(["str", "dex"])
                .with_category(CategoryNode::new("derived", "Derived").with_fields(["ac"])),
            CategoryNode::new("combat", "Combat").with_fields(["hp"]),
            CategoryNode::new("social", "Social"),
        ])
    }

    fn root_keys(schema: &TemplateSchema) -> Vec<&str> {
        schema.categories.iter().map(|n| n.key.as_str()).collect()
    }

    #[test]
    fn test_add_category_to_root_and_parent() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .add_category(&mut schema, None, CategoryNode::new("magic", "Magic"))
            .unwrap();
        editor
            .add_category(
                &mut schema,
                Some(&CategoryKey::from("combat")),
                CategoryNode::new("defense", "Defense"),
            )
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["stats", "combat", "social", "magic"]);
        assert_eq!(schema.level_of("defense"), Some(2));
    }

    #[test]
    fn test_add_category_generates_missing_key() {
        let editor = SchemaEditor::default();
        let mut schema = TemplateSchema::default();
        let key = editor
            .add_category(&mut schema, None, CategoryNode::new("", "Unnamed key"))
            .unwrap();
        assert!(!key.is_empty());
        assert_eq!(schema.categories[0].key, key);
    }

    #[test]
    fn test_add_category_enforces_depth() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        let err = editor
            .add_category(
                &mut schema,
                Some(&CategoryKey::from("derived")),
                CategoryNode::new("too-deep", "Too deep"),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::depth_exceeded(3, 2));

        let nested = CategoryNode::new("outer", "Outer").with_category(
            CategoryNode::new("mid", "Mid").with_category(CategoryNode::new("inner", "Inner")),
        );
        assert!(editor.add_category(&mut schema, None, nested.clone()).is_err());
        assert!(SchemaEditor::new(3)
            .add_category(&mut schema, None, nested)
            .is_ok());
    }

    #[test]
    fn test_add_category_rejects_reserved_and_duplicate_keys() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        assert!(matches!(
            editor.add_category(&mut schema, None, CategoryNode::new("other", "Other")),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            editor.add_category(&mut schema, None, CategoryNode::new("derived", "Again")),
            Err(DomainError::Constraint(_))
        ));
        assert!(matches!(
            editor.add_category(
                &mut schema,
                Some(&CategoryKey::from("missing")),
                CategoryNode::new("x", "X")
            ),
            Err(DomainError::NotFound { .. })
        ));
        assert!(editor
            .add_category(&mut schema, None, CategoryNode::new("blank", "  "))
            .is_err());
    }

    #[test]
    fn test_add_category_checks_nested_nodes() {
        let editor = SchemaEditor::new(3);
        let mut schema = schema();
        let before = schema.clone();
        let gear = |child: CategoryNode| CategoryNode::new("gear", "Gear").with_category(child);

        let cases = [
            (gear(CategoryNode::new("combat", "Dup")), "constraint"),
            (gear(CategoryNode::new("other", "Reserved")), "validation"),
            (gear(CategoryNode::new("", "  ")), "validation"),
            (
                gear(CategoryNode::new("packs", "Packs"))
                    .with_category(CategoryNode::new("packs", "Packs again")),
                "constraint",
            ),
            (
                gear(CategoryNode::new("packs", "Packs")
                    .with_category(CategoryNode::new("gear", "Gear again"))),
                "constraint",
            ),
        ];
        for (node, expected) in cases {
            let err = editor.add_category(&mut schema, None, node).unwrap_err();
            let kind = match err {
                DomainError::Constraint(_) => "constraint",
                DomainError::Validation(_) => "validation",
                other => panic!("unexpected error {other:?}"),
            };
            assert_eq!(kind, expected);
            assert_eq!(schema, before);
        }

        editor
            .add_category(
                &mut schema,
                None,
                gear(CategoryNode::new("", " Packs ").with_category(CategoryNode::new("", "Pouches"))),
            )
            .unwrap();
        let packs = &schema.find("gear").unwrap().categories[0];
        assert!(!packs.key.is_empty());
        assert_eq!(packs.name, "Packs");
        assert!(!packs.categories[0].key.is_empty());
        assert_ne!(packs.key, packs.categories[0].key);
    }

    #[test]
    fn test_insert_category_at_index() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .insert_category(&mut schema, None, Some(0), CategoryNode::new("first", "First"))
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["first", "stats", "combat", "social"]);
        assert!(editor
            .insert_category(&mut schema, None, Some(9), CategoryNode::new("far", "Far"))
            .is_err());
    }

    #[test]
    fn test_remove_category_does_not_relocate_fields() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        let removed = editor
            .remove_category(&mut schema, &CategoryKey::from("derived"))
            .unwrap();
        assert_eq!(removed.fields, vec![FieldKey::from("ac")]);
        assert!(!schema.claimed_keys().contains(&FieldKey::from("ac")));
        assert_eq!(
            schema.find("stats").unwrap().fields,
            vec![FieldKey::from("str"), FieldKey::from("dex")]
        );
        assert!(editor
            .remove_category(&mut schema, &CategoryKey::from("derived"))
            .is_err());
    }

    #[test]
    fn test_move_category_up_and_down() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .move_category_up(&mut schema, &CategoryKey::from("combat"))
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["combat", "stats", "social"]);
        editor
            .move_category_up(&mut schema, &CategoryKey::from("combat"))
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["combat", "stats", "social"]);
        editor
            .move_category_down(&mut schema, &CategoryKey::from("stats"))
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["combat", "social", "stats"]);
        editor
            .move_category_down(&mut schema, &CategoryKey::from("stats"))
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["combat", "social", "stats"]);
    }

    #[test]
    fn test_move_category_to_index() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .move_category(&mut schema, &CategoryKey::from("social"), 0)
            .unwrap();
        assert_eq!(root_keys(&schema), vec!["social", "stats", "combat"]);
        assert!(editor
            .move_category(&mut schema, &CategoryKey::from("social"), 3)
            .is_err());
    }

    #[test]
    fn test_rename_category() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .rename_category(&mut schema, &CategoryKey::from("derived"), " Computed ")
            .unwrap();
        assert_eq!(schema.find("derived").unwrap().name, "Computed");
        assert!(editor
            .rename_category(&mut schema, &CategoryKey::from("derived"), "")
            .is_err());
    }

    #[test]
    fn test_move_field_is_idempotent() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        let field = FieldKey::from("hp");
        let target = CategoryKey::from("derived");
        editor.move_field(&mut schema, &field, &target).unwrap();
        let once = schema.clone();
        editor.move_field(&mut schema, &field, &target).unwrap();
        assert_eq!(schema, once);
        assert_eq!(
            schema.find("derived").unwrap().fields,
            vec![FieldKey::from("ac"), FieldKey::from("hp")]
        );
        assert!(schema.find("combat").unwrap().fields.is_empty());
    }

    #[test]
    fn test_move_field_removes_every_occurrence() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        schema.find_mut("social").unwrap().fields.push(FieldKey::from("str"));
        editor
            .move_field(&mut schema, &FieldKey::from("str"), &CategoryKey::from("combat"))
            .unwrap();
        assert_eq!(schema.find("stats").unwrap().fields, vec![FieldKey::from("dex")]);
        assert!(schema.find("social").unwrap().fields.is_empty());
        assert_eq!(
            schema.find("combat").unwrap().fields,
            vec![FieldKey::from("hp"), FieldKey::from("str")]
        );
    }

    #[test]
    fn test_move_field_to_other_unclaims() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .move_field(&mut schema, &FieldKey::from("ac"), &CategoryKey::other())
            .unwrap();
        assert!(!schema.claimed_keys().contains(&FieldKey::from("ac")));
    }

    #[test]
    fn test_move_field_to_unknown_category_leaves_tree_unchanged() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        let before = schema.clone();
        assert!(editor
            .move_field(&mut schema, &FieldKey::from("hp"), &CategoryKey::from("nope"))
            .is_err());
        assert_eq!(schema, before);
    }
}
