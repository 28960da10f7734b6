//! Character entity

use sheetkeep_domain::{CharacterId, FieldMap, GroupId, TemplateId};

use super::Template;

/// A character built from a template.
///
/// Field maps are replaced wholesale on update; the character never edits
/// its template's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub group_id: GroupId,
    pub template_id: TemplateId,
    pub name: String,
    pub fields: FieldMap,
}

impl Character {
    /// Create a character whose fields start as a copy of the template's.
    pub fn from_template(template: &Template, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            group_id: template.group_id,
            template_id: template.id,
            name: name.into(),
            fields: template.fields.clone(),
        }
    }

    pub fn replace_fields(&mut self, fields: FieldMap) {
        self.fields = fields;
    }
}
