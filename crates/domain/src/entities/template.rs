//! Template entity - a reusable character blueprint
//!
//! The template owns the category schema. Its field map is the starting
//! point for every character created from it.

use sheetkeep_domain::{FieldMap, GroupId, TemplateId, TemplateSchema};

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub group_id: GroupId,
    pub name: String,
    pub schema: TemplateSchema,
    pub fields: FieldMap,
}

impl Template {
    pub fn new(group_id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id: TemplateId::new(),
            group_id,
            name: name.into(),
            schema: TemplateSchema::default(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_schema(mut self, schema: TemplateSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }
}
