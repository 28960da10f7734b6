//! Category resolution
//!
//! Places every field of a record into the category tree exactly once:
//!
//! 1. Fields listed by a schema node go there (`is_static = true`). The first
//!    listing in depth-first order wins; listed keys missing from the record
//!    are dropped.
//! 2. Remaining fields follow their own category hint if it names any node in
//!    the tree, otherwise they land in the computed "other" bucket
//!    (`is_static = false`), in record order.
//! 3. Nodes left without fields or non-empty descendants are omitted, and so
//!    is an empty "other" bucket.
//!
//! A node whose key already appears on the path from its root is a cycle: it
//! keeps its own fields but is not descended into.

mod data;

use std::collections::HashSet;

use sheetkeep_domain::{CategoryKey, CategoryNode, FieldKey, FieldMap};

pub use data::{placed_field_keys, CategoryData, CategoryMap, PlacedField};

/// Display name of the computed bucket when none is configured.
pub const DEFAULT_OTHER_CATEGORY_NAME: &str = "Other";

/// Resolves field maps against category schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResolver {
    other_name: String,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(DEFAULT_OTHER_CATEGORY_NAME)
    }
}

impl CategoryResolver {
    pub fn new(other_name: impl Into<String>) -> Self {
        Self {
            other_name: other_name.into(),
        }
    }

    pub fn other_name(&self) -> &str {
        &self.other_name
    }

    pub fn resolve(&self, fields: &FieldMap, schema: &[CategoryNode]) -> CategoryMap {
        let mut claimed: HashSet<&FieldKey> = HashSet::new();
        let mut path: Vec<&CategoryKey> = Vec::new();

        let mut tree: Vec<CategoryData> = schema
            .iter()
            .map(|node| resolve_node(node, fields, &mut claimed, &mut path))
            .collect();

        let mut other = CategoryData::new(CategoryKey::other(), self.other_name.as_str());
        for (key, field) in fields {
            if claimed.contains(key) {
                continue;
            }
            let hinted = field
                .category
                .as_ref()
                .filter(|hint| !hint.is_other())
                .and_then(|hint| find_data_mut(&mut tree, hint));
            match hinted {
                Some(target) => target.place(key, field, false),
                None => {
                    if let Some(hint) = &field.category {
                        tracing::debug!(field = %key, hint = %hint, "Category hint not in schema");
                    }
                    other.place(key, field, false);
                }
            }
        }

        let mut result = CategoryMap::new();
        for data in prune(tree) {
            insert_or_absorb(&mut result, data);
        }
        if !other.is_empty() {
            insert_or_absorb(&mut result, other);
        }

        tracing::debug!(
            fields = fields.len(),
            schema_roots = schema.len(),
            categories = result.len(),
            "Resolved field categories"
        );
        result
    }
}

/// Resolve with the default "Other" bucket name.
pub fn resolve(fields: &FieldMap, schema: &[CategoryNode]) -> CategoryMap {
    CategoryResolver::default().resolve(fields, schema)
}

fn resolve_node<'a>(
    node: &'a CategoryNode,
    fields: &FieldMap,
    claimed: &mut HashSet<&'a FieldKey>,
    path: &mut Vec<&'a CategoryKey>,
) -> CategoryData {
    let mut data = CategoryData::new(node.key.clone(), node.name.as_str());

    for key in &node.fields {
        let Some(field) = fields.get(key.as_str()) else {
            tracing::debug!(category = %node.key, field = %key, "Dropping dangling field key");
            continue;
        };
        if claimed.insert(key) {
            data.place(key, field, true);
        }
    }

    if path.contains(&&node.key) {
        tracing::warn!(category = %node.key, "Cyclic category reference, not descending");
        return data;
    }

    path.push(&node.key);
    data.subcategories = node
        .categories
        .iter()
        .map(|child| resolve_node(child, fields, claimed, path))
        .collect();
    path.pop();

    data
}

fn find_data_mut<'a>(nodes: &'a mut [CategoryData], key: &CategoryKey) -> Option<&'a mut CategoryData> {
    for node in nodes.iter_mut() {
        if &node.key == key {
            return Some(node);
        }
        if let Some(found) = find_data_mut(&mut node.subcategories, key) {
            return Some(found);
        }
    }
    None
}

fn prune(nodes: Vec<CategoryData>) -> Vec<CategoryData> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            node.subcategories = prune(std::mem::take(&mut node.subcategories));
            (!node.is_empty()).then_some(node)
        })
        .collect()
}

fn insert_or_absorb(result: &mut CategoryMap, data: CategoryData) {
    match result.get_mut(&data.key) {
        Some(existing) => existing.absorb(data),
        None => {
            result.insert(data.key.clone(), data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkeep_domain::{Field, SchemaEditor, TemplateSchema};

    fn fields() -> FieldMap {
        FieldMap::new()
            .with_field("str", Field::new("Strength", 14.0))
            .with_field("dex", Field::new("Dexterity", 12.0))
            .with_field("hp", Field::new("Hit Points", 9.0).with_max_value(12.0))
            .with_field("ac", Field::new("Armor Class", 15.0))
            .with_field("luck", Field::new("Luck", 2.0))
    }

    fn schema() -> TemplateSchema {
        TemplateSchema::new(vec![
            CategoryNode::new("abilities", "Abilities").with_fields(["str", "dex"]),
            CategoryNode::new("combat", "Combat")
                .with_fields(["hp"])
                .with_category(CategoryNode::new("defense", "Defense").with_fields(["ac"])),
        ])
    }

    fn keys_of(data: &CategoryData) -> Vec<&str> {
        data.fields.iter().map(|placed| placed.key.as_str()).collect()
    }

    fn top_keys(map: &CategoryMap) -> Vec<&str> {
        map.keys().map(CategoryKey::as_str).collect()
    }

    #[test]
    fn test_structural_placement_in_schema_order() {
        let result = resolve(&fields(), &schema().categories);

        assert_eq!(top_keys(&result), vec!["abilities", "combat", "other"]);
        assert_eq!(keys_of(&result["abilities"]), vec!["str", "dex"]);
        assert!(result["abilities"].fields.iter().all(|placed| placed.is_static));

        let combat = &result["combat"];
        assert_eq!(keys_of(combat), vec!["hp"]);
        assert_eq!(combat.subcategories.len(), 1);
        assert_eq!(keys_of(&combat.subcategories[0]), vec!["ac"]);

        let other = &result["other"];
        assert_eq!(other.name, "Other");
        assert_eq!(keys_of(other), vec!["luck"]);
        assert!(!other.fields[0].is_static);
    }

    #[test]
    fn test_other_absent_when_everything_claimed() {
        let fields = FieldMap::new()
            .with_field("str", Field::new("Strength", 14.0))
            .with_field("ac", Field::new("Armor Class", 15.0));
        let result = resolve(&fields, &schema().categories);
        assert!(!result.contains_key("other"));
    }

    #[test]
    fn test_dangling_keys_dropped_and_empty_nodes_omitted() {
        let fields = FieldMap::new().with_field("ac", Field::new("Armor Class", 15.0));
        let result = resolve(&fields, &schema().categories);

        assert_eq!(top_keys(&result), vec!["combat"]);
        let combat = &result["combat"];
        assert!(combat.fields.is_empty());
        assert_eq!(keys_of(&combat.subcategories[0]), vec!["ac"]);
    }

    #[test]
    fn test_hint_places_field_in_nested_category() {
        let fields = fields().with_field(
            "parry",
            Field::new("Parry", 3.0).with_category("defense"),
        );
        let result = resolve(&fields, &schema().categories);

        let defense = &result["combat"].subcategories[0];
        assert_eq!(keys_of(defense), vec!["ac", "parry"]);
        assert!(defense.fields[0].is_static);
        assert!(!defense.fields[1].is_static);
    }

    #[test]
    fn test_hint_revives_category_with_no_listed_fields_present() {
        let schema = TemplateSchema::new(vec![
            CategoryNode::new("magic", "Magic").with_fields(["mana"]),
        ]);
        let fields = FieldMap::new()
            .with_field("focus", Field::new("Focus", 1.0).with_category("magic"));
        let result = resolve(&fields, &schema.categories);

        assert_eq!(top_keys(&result), vec!["magic"]);
        assert_eq!(keys_of(&result["magic"]), vec!["focus"]);
    }

    #[test]
    fn test_schema_listing_wins_over_hint() {
        let fields = FieldMap::new()
            .with_field("hp", Field::new("Hit Points", 9.0).with_category("abilities"));
        let result = resolve(&fields, &schema().categories);

        assert!(!result.contains_key("abilities"));
        assert_eq!(keys_of(&result["combat"]), vec!["hp"]);
        assert!(result["combat"].fields[0].is_static);
    }

    #[test]
    fn test_unknown_hint_falls_through_to_other() {
        let fields = FieldMap::new()
            .with_field("x", Field::new("X", 1.0).with_category("nowhere"))
            .with_field("y", Field::new("Y", 1.0).with_category("other"))
            .with_field("z", Field::new("Z", 1.0));
        let result = resolve(&fields, &schema().categories);
        assert_eq!(top_keys(&result), vec!["other"]);
        assert_eq!(keys_of(&result["other"]), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_field_listed_twice_is_placed_once() {
        let schema = TemplateSchema::new(vec![
            CategoryNode::new("a", "A").with_fields(["hp"]),
            CategoryNode::new("b", "B").with_fields(["hp", "str"]),
        ]);
        let result = resolve(&fields(), &schema.categories);
        assert_eq!(keys_of(&result["a"]), vec!["hp"]);
        assert_eq!(keys_of(&result["b"]), vec!["str"]);
        assert_eq!(placed_field_keys(&result).len(), fields().len());
    }

    #[test]
    fn test_cyclic_reference_terminates() {
        let looped = CategoryNode::new("loop", "Loop")
            .with_fields(["str"])
            .with_category(
                CategoryNode::new("inner", "Inner")
                    .with_fields(["dex"])
                    .with_category(
                        CategoryNode::new("loop", "Loop")
                            .with_fields(["str", "hp"])
                            .with_category(CategoryNode::new("beyond", "Beyond").with_fields(["ac"])),
                    ),
            );
        let result = resolve(&fields(), &[looped]);

        let top = &result["loop"];
        assert_eq!(keys_of(top), vec!["str"]);
        let inner = &top.subcategories[0];
        assert_eq!(keys_of(inner), vec!["dex"]);
        let cut = &inner.subcategories[0];
        assert_eq!(keys_of(cut), vec!["hp"]);
        assert!(cut.subcategories.is_empty());
        assert_eq!(keys_of(&result["other"]), vec!["ac", "luck"]);
    }

    #[test]
    fn test_duplicate_top_level_keys_are_merged() {
        let schema = vec![
            CategoryNode::new("a", "A").with_fields(["str"]),
            CategoryNode::new("a", "A again").with_fields(["dex"]),
        ];
        let result = resolve(&fields(), &schema);
        assert_eq!(keys_of(&result["a"]), vec!["str", "dex"]);
    }

    #[test]
    fn test_removed_category_falls_back_to_other() {
        let editor = SchemaEditor::default();
        let mut schema = schema();
        editor
            .remove_category(&mut schema, &CategoryKey::from("defense"))
            .unwrap();
        let result = resolve(&fields(), &schema.categories);
        assert_eq!(keys_of(&result["other"]), vec!["ac", "luck"]);
    }

    #[test]
    fn test_custom_other_name() {
        let resolver = CategoryResolver::new("Misc");
        let result = resolver.resolve(&fields(), &[]);
        assert_eq!(result["other"].name, "Misc");
        assert_eq!(result["other"].key, CategoryKey::other());
    }

    #[test]
    fn test_to_schema_category_keeps_key_lists() {
        let fields = fields().with_field(
            "parry",
            Field::new("Parry", 3.0).with_category("defense"),
        );
        let result = resolve(&fields, &schema().categories);
        let node = result["combat"].to_schema_category();

        assert_eq!(node.key, CategoryKey::from("combat"));
        assert_eq!(node.fields, vec![FieldKey::from("hp")]);
        assert_eq!(
            node.categories[0].fields,
            vec![FieldKey::from("ac"), FieldKey::from("parry")]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(resolve(&FieldMap::new(), &schema().categories).is_empty());
        assert!(resolve(&FieldMap::new(), &[]).is_empty());
    }

    #[test]
    fn test_resolved_map_serializes_camel_case() {
        let fields = FieldMap::new()
            .with_field("hp", Field::new("HP", 9.0).with_max_value(12.0))
            .with_field("luck", Field::new("Luck", 2.0));
        let schema = vec![CategoryNode::new("combat", "Combat").with_fields(["hp"])];

        let value = serde_json::to_value(resolve(&fields, &schema)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "combat": {
                    "key": "combat",
                    "name": "Combat",
                    "fields": [{
                        "key": "hp",
                        "field": { "name": "HP", "value": 9.0, "maxValue": 12.0, "description": "" },
                        "isStatic": true
                    }]
                },
                "other": {
                    "key": "other",
                    "name": "Other",
                    "fields": [{
                        "key": "luck",
                        "field": { "name": "Luck", "value": 2.0, "description": "" },
                        "isStatic": false
                    }]
                }
            })
        );
    }
}
