//! Sheetkeep Shared - wire shapes for schemas, field patches and attribute
//! definitions
//!
//! Everything here is camelCase JSON. Typed `*Data` structs round-trip through
//! serde; the `parse_*` functions take loosely typed input and report the
//! first violating path (`fields.hp.value`) instead of a serde position.
//!
//! # Design Principles
//!
//! 1. **No business logic** - conversion into domain values only
//! 2. **Generated keys** - category nodes without a key get one on the way in

pub mod attributes;
pub mod error;
pub mod fields;
pub mod parse;
pub mod schema;

pub use attributes::{AttributeData, AttributeDefinitionData};
pub use error::ProtocolError;
pub use fields::{into_field_map_patch, FieldData, FieldMapPatchData, FieldPatchData};
pub use parse::{
    parse_attribute_definitions, parse_field_map, parse_field_patch, parse_json, parse_schema,
};
pub use schema::{CategoryNodeData, TemplateSchemaData};
