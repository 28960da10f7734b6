//! Engine configuration

use std::env;

use anyhow::{bail, Context, Result};

use sheetkeep_domain::{SchemaEditor, DEFAULT_MAX_CATEGORY_DEPTH};

use crate::categorize::{CategoryResolver, DEFAULT_OTHER_CATEGORY_NAME};
use crate::grouping::{AttributeGrouper, DEFAULT_ALL_ITEMS_LABEL, DEFAULT_ALL_SKILLS_LABEL};

pub const MAX_CATEGORY_DEPTH_VAR: &str = "SHEETKEEP_MAX_CATEGORY_DEPTH";
pub const OTHER_CATEGORY_NAME_VAR: &str = "SHEETKEEP_OTHER_CATEGORY_NAME";
pub const ALL_ITEMS_LABEL_VAR: &str = "SHEETKEEP_ALL_ITEMS_LABEL";
pub const ALL_SKILLS_LABEL_VAR: &str = "SHEETKEEP_ALL_SKILLS_LABEL";

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Nesting limit enforced by the schema editor (resolver ignores it)
    pub max_category_depth: usize,
    /// Display name of the computed "other" bucket
    pub other_category_name: String,
    /// Root label when grouping items by no attribute
    pub all_items_label: String,
    /// Root label when no skill attribute is filtered
    pub all_skills_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_category_depth: DEFAULT_MAX_CATEGORY_DEPTH,
            other_category_name: DEFAULT_OTHER_CATEGORY_NAME.to_string(),
            all_items_label: DEFAULT_ALL_ITEMS_LABEL.to_string(),
            all_skills_label: DEFAULT_ALL_SKILLS_LABEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source; unset variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_category_depth = match lookup(MAX_CATEGORY_DEPTH_VAR) {
            Some(raw) => {
                let depth: usize = raw.trim().parse().with_context(|| {
                    format!("{MAX_CATEGORY_DEPTH_VAR} must be a positive integer, got '{raw}'")
                })?;
                if depth == 0 {
                    bail!("{MAX_CATEGORY_DEPTH_VAR} must be at least 1");
                }
                depth
            }
            None => defaults.max_category_depth,
        };

        Ok(Self {
            max_category_depth,
            other_category_name: non_empty(lookup(OTHER_CATEGORY_NAME_VAR))
                .unwrap_or(defaults.other_category_name),
            all_items_label: non_empty(lookup(ALL_ITEMS_LABEL_VAR))
                .unwrap_or(defaults.all_items_label),
            all_skills_label: non_empty(lookup(ALL_SKILLS_LABEL_VAR))
                .unwrap_or(defaults.all_skills_label),
        })
    }

    pub fn schema_editor(&self) -> SchemaEditor {
        SchemaEditor::new(self.max_category_depth)
    }

    pub fn resolver(&self) -> CategoryResolver {
        CategoryResolver::new(self.other_category_name.as_str())
    }

    pub fn grouper(&self) -> AttributeGrouper {
        AttributeGrouper::new(self.all_items_label.as_str(), self.all_skills_label.as_str())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
