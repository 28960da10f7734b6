//! Sheetkeep Domain - vocabulary shared by the resolver, the grouping engine
//! and the schema editor.

extern crate self as sheetkeep_domain;

pub mod attribute;
pub mod category;
pub mod entities;
pub mod error;
pub mod field;
pub mod ids;
pub mod keys;
pub mod names;
pub mod schema_editor;

pub use attribute::{Attribute, AttributeDefinition, Attributed};
pub use category::{CategoryNode, TemplateSchema, DEFAULT_MAX_CATEGORY_DEPTH};
pub use entities::{Character, Group, Item, Skill, Template};
pub use error::DomainError;
pub use field::{Field, FieldMap, FieldMapPatch, FieldPatch};
pub use ids::{CharacterId, GroupId, ItemId, SkillId, TemplateId};
pub use keys::{CategoryKey, FieldKey, OTHER_CATEGORY_KEY};
pub use names::CategoryName;
pub use schema_editor::SchemaEditor;
