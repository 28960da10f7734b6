//! Item entity - equipment and loot tagged with free-form attributes

use serde::{Deserialize, Serialize};

use sheetkeep_domain::{Attribute, Attributed, GroupId, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub group_id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Option<Vec<Attribute>>,
}

impl Item {
    pub fn new(group_id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            group_id,
            name: name.into(),
            description: String::new(),
            attributes: None,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.get_or_insert_with(Vec::new).push(attribute);
        self
    }
}

impl Attributed for Item {
    fn attributes(&self) -> &[Attribute] {
        self.attributes.as_deref().unwrap_or(&[])
    }
}
