//! Attribute grouping
//!
//! Partitions records into a tree with one level per attribute. Only the
//! deepest level holds records; every level above holds children only.
//!
//! Two entry points with different conventions:
//!
//! | | `group_by` | `group_by_filtered_attributes` |
//! |---|---|---|
//! | levels | attribute names, matched by `name` | `is_filtered` definitions, matched by `key` |
//! | label | `"<name>: <value>"` | `"<definition name>: <value>"` |
//! | missing | `"<name>: Not set"`, last | `"Other"`, last |
//! | order | numeric when both values are plain integers, else locale | plain label order |

mod filtered;
pub mod ordering;

use indexmap::IndexMap;
use serde::Serialize;

use sheetkeep_domain::Attributed;

use self::ordering::{compare_attribute_values, sort_tolerant};

pub const DEFAULT_ALL_ITEMS_LABEL: &str = "All items";
pub const DEFAULT_ALL_SKILLS_LABEL: &str = "All skills";
pub const FILTERED_MISSING_LABEL: &str = "Other";
/// Value part of the missing-value label. An attribute whose value is this
/// exact text joins the missing-value bucket, so the label stays unique.
pub const NOT_SET_VALUE: &str = "Not set";

/// One node of a grouping tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode<T> {
    pub name: String,
    pub items: Vec<T>,
    pub children: Vec<GroupNode<T>>,
}

impl<T> GroupNode<T> {
    pub fn leaf(name: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            name: name.into(),
            items,
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<GroupNode<T>>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Records of this node and its descendants, leaves in order.
    pub fn all_items(&self) -> Vec<&T> {
        let mut out: Vec<&T> = self.items.iter().collect();
        for child in &self.children {
            out.extend(child.all_items());
        }
        out
    }
}

/// Groups attributed records. Holds the labels used for ungrouped roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGrouper {
    all_items_label: String,
    all_skills_label: String,
}

impl Default for AttributeGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_ALL_ITEMS_LABEL, DEFAULT_ALL_SKILLS_LABEL)
    }
}

impl AttributeGrouper {
    pub fn new(all_items_label: impl Into<String>, all_skills_label: impl Into<String>) -> Self {
        Self {
            all_items_label: all_items_label.into(),
            all_skills_label: all_skills_label.into(),
        }
    }

    /// Group by the values of `attr_names`, first name outermost.
    ///
    /// With no names the result is a single root holding every record in
    /// input order.
    pub fn group_by<T, S>(&self, items: &[T], attr_names: &[S]) -> Vec<GroupNode<T>>
    where
        T: Attributed + Clone,
        S: AsRef<str>,
    {
        tracing::debug!(
            items = items.len(),
            levels = attr_names.len(),
            "Grouping records by attributes"
        );
        if attr_names.is_empty() {
            return vec![GroupNode::leaf(self.all_items_label.as_str(), items.to_vec())];
        }
        group_level(items.to_vec(), attr_names)
    }

    pub fn all_items_label(&self) -> &str {
        &self.all_items_label
    }

    pub fn all_skills_label(&self) -> &str {
        &self.all_skills_label
    }
}

/// `AttributeGrouper::group_by` with default labels.
pub fn group_by<T, S>(items: &[T], attr_names: &[S]) -> Vec<GroupNode<T>>
where
    T: Attributed + Clone,
    S: AsRef<str>,
{
    AttributeGrouper::default().group_by(items, attr_names)
}

pub use filtered::group_by_filtered_attributes;

fn group_level<T, S>(items: Vec<T>, attr_names: &[S]) -> Vec<GroupNode<T>>
where
    T: Attributed + Clone,
    S: AsRef<str>,
{
    let Some((first, rest)) = attr_names.split_first() else {
        return Vec::new();
    };
    let name = first.as_ref();

    let mut buckets: IndexMap<Option<String>, Vec<T>> = IndexMap::new();
    for item in items {
        let value = item
            .attribute_named(name)
            .map(|attr| attr.value.as_str())
            .filter(|value| !value.is_empty() && *value != NOT_SET_VALUE)
            .map(str::to_string);
        buckets.entry(value).or_default().push(item);
    }

    let groups: Vec<(Option<String>, GroupNode<T>)> = buckets
        .into_iter()
        .map(|(value, members)| {
            let label = match &value {
                Some(value) => format!("{}: {}", name, value),
                None => format!("{}: {}", name, NOT_SET_VALUE),
            };
            let node = if rest.is_empty() {
                GroupNode::leaf(label, members)
            } else {
                GroupNode::branch(label, group_level(members, rest))
            };
            (value, node)
        })
        .collect();

    sort_tolerant(groups, |(a, _), (b, _)| {
        compare_attribute_values(a.as_deref(), b.as_deref())
    })
    .into_iter()
    .map(|(_, node)| node)
    .collect()
}
