//! Group entity - owner of attribute definitions
//!
//! Definition order is preserved end to end: it decides grouping precedence.

use sheetkeep_domain::{AttributeDefinition, Attributed, GroupId};

use super::{Item, Skill};

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub item_attributes: Vec<AttributeDefinition>,
    pub skill_attributes: Vec<AttributeDefinition>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            item_attributes: Vec::new(),
            skill_attributes: Vec::new(),
        }
    }

    /// Skill definitions taking part in grouping, in defined order.
    pub fn filtered_skill_attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.skill_attributes.iter().filter(|def| def.is_filtered)
    }

    /// Record every item attribute value under the definition with the same key.
    pub fn learn_item_values(&mut self, items: &[Item]) -> usize {
        learn_values(&mut self.item_attributes, items)
    }

    pub fn learn_skill_values(&mut self, skills: &[Skill]) -> usize {
        learn_values(&mut self.skill_attributes, skills)
    }
}

fn learn_values<T: Attributed>(definitions: &mut [AttributeDefinition], records: &[T]) -> usize {
    let mut learned = 0;
    for record in records {
        for attribute in record.attributes() {
            if let Some(def) = definitions.iter_mut().find(|def| def.key == attribute.key) {
                if def.record_value(&attribute.value) {
                    learned += 1;
                }
            }
        }
    }
    learned
}
