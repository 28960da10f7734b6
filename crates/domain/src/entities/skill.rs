//! Skill entity - abilities grouped by the group's filtered attributes

use serde::{Deserialize, Serialize};

use sheetkeep_domain::{Attribute, Attributed, GroupId, SkillId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub group_id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Option<Vec<Attribute>>,
}

impl Skill {
    pub fn new(group_id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id: SkillId::new(),
            group_id,
            name: name.into(),
            description: String::new(),
            attributes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.get_or_insert_with(Vec::new).push(attribute);
        self
    }
}

impl Attributed for Skill {
    fn attributes(&self) -> &[Attribute] {
        self.attributes.as_deref().unwrap_or(&[])
    }
}
