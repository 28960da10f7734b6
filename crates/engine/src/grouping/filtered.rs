//! Skill grouping by filtered attribute definitions

use indexmap::IndexMap;

use sheetkeep_domain::{AttributeDefinition, Attributed};

use super::ordering::compare_filtered_labels;
use super::{AttributeGrouper, GroupNode, FILTERED_MISSING_LABEL};

impl AttributeGrouper {
    /// Group by the `is_filtered` definitions, in their defined order.
    ///
    /// Values are matched by definition key and compared case-sensitively, so
    /// `"Fire"` and `"fire"` are separate groups.
    pub fn group_by_filtered_attributes<T>(
        &self,
        items: &[T],
        definitions: &[AttributeDefinition],
    ) -> Vec<GroupNode<T>>
    where
        T: Attributed + Clone,
    {
        let filtered: Vec<&AttributeDefinition> =
            definitions.iter().filter(|def| def.is_filtered).collect();
        tracing::debug!(
            items = items.len(),
            definitions = definitions.len(),
            filtered = filtered.len(),
            "Grouping records by filtered attributes"
        );
        if filtered.is_empty() {
            return vec![GroupNode::leaf(self.all_skills_label(), items.to_vec())];
        }
        filtered_level(items.to_vec(), &filtered)
    }
}

/// `AttributeGrouper::group_by_filtered_attributes` with default labels.
pub fn group_by_filtered_attributes<T>(
    items: &[T],
    definitions: &[AttributeDefinition],
) -> Vec<GroupNode<T>>
where
    T: Attributed + Clone,
{
    AttributeGrouper::default().group_by_filtered_attributes(items, definitions)
}

fn filtered_level<T>(items: Vec<T>, definitions: &[&AttributeDefinition]) -> Vec<GroupNode<T>>
where
    T: Attributed + Clone,
{
    let Some((definition, rest)) = definitions.split_first() else {
        return Vec::new();
    };

    // Keyed by label; `None` is the missing-value bucket.
    let mut buckets: IndexMap<Option<String>, Vec<T>> = IndexMap::new();
    for item in items {
        let label = item
            .attribute_keyed(&definition.key)
            .map(|attr| attr.value.as_str())
            .filter(|value| !value.is_empty())
            .map(|value| format!("{}: {}", definition.name, value));
        buckets.entry(label).or_default().push(item);
    }

    let mut groups: Vec<(Option<String>, Vec<T>)> = buckets.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| compare_filtered_labels(a.as_deref(), b.as_deref()));

    groups
        .into_iter()
        .map(|(label, members)| {
            let name = label.unwrap_or_else(|| FILTERED_MISSING_LABEL.to_string());
            if rest.is_empty() {
                GroupNode::leaf(name, members)
            } else {
                GroupNode::branch(name, filtered_level(members, rest))
            }
        })
        .collect()
}
