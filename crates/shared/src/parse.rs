//! Shape-checked parsing of loosely typed JSON input
//!
//! Each parser walks the input once and stops at the first value of the wrong
//! shape, naming it by path: members are joined with `.`, array elements are
//! indexed as `[n]`. Unknown members are ignored.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use sheetkeep_domain::{AttributeDefinition, FieldMap, FieldMapPatch, TemplateSchema};

use crate::attributes::AttributeDefinitionData;
use crate::error::ProtocolError;
use crate::fields::{into_field_map_patch, FieldData, FieldPatchData};
use crate::schema::{CategoryNodeData, TemplateSchemaData};

type Result<T> = std::result::Result<T, ProtocolError>;

/// Parse raw JSON text.
pub fn parse_json(input: &str) -> Result<Value> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a record's field map: `{ "<key>": { "name", "value", ... } }`.
pub fn parse_field_map(value: &Value) -> Result<FieldMap> {
    let entries = object(value, "fields")?;
    let mut fields = FieldMap::new();
    for (key, entry) in entries {
        let path = format!("fields.{key}");
        fields = fields.with_field(key.as_str(), field_data(entry, &path)?.into());
    }
    Ok(fields)
}

/// Parse a field-map patch; `null` entries delete their field.
pub fn parse_field_patch(value: &Value) -> Result<FieldMapPatch> {
    let entries = object(value, "patch")?;
    let mut patch = IndexMap::new();
    for (key, entry) in entries {
        let path = format!("patch.{key}");
        let data = match entry {
            Value::Null => None,
            entry => Some(field_patch_data(entry, &path)?),
        };
        patch.insert(key.clone(), data);
    }
    Ok(into_field_map_patch(patch))
}

/// Parse a category schema: `{ "categories": [...] }`.
pub fn parse_schema(value: &Value) -> Result<TemplateSchema> {
    let root = object(value, "schema")?;
    let categories = match present(root, "categories") {
        Some(nodes) => node_list(nodes, "schema.categories")?,
        None => Vec::new(),
    };
    Ok(TemplateSchemaData { categories }.into_domain())
}

/// Parse an ordered array of attribute definitions.
pub fn parse_attribute_definitions(value: &Value) -> Result<Vec<AttributeDefinition>> {
    let items = array(value, "attributes")?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = format!("attributes[{index}]");
            definition_data(item, &path).map(AttributeDefinition::from)
        })
        .collect()
}

fn field_data(value: &Value, path: &str) -> Result<FieldData> {
    let entry = object(value, path)?;
    Ok(FieldData {
        name: string(required(entry, "name", path)?, &member(path, "name"))?,
        value: number(required(entry, "value", path)?, &member(path, "value"))?,
        max_value: optional(entry, "maxValue", path, number)?,
        modifier: optional(entry, "modifier", path, number)?,
        description: optional(entry, "description", path, string)?.unwrap_or_default(),
        category: optional(entry, "category", path, string)?,
        formula: optional(entry, "formula", path, string)?,
    })
}

fn field_patch_data(value: &Value, path: &str) -> Result<FieldPatchData> {
    let entry = object(value, path)?;
    Ok(FieldPatchData {
        name: not_null(entry, "name", path, string)?,
        value: not_null(entry, "value", path, number)?,
        max_value: nullable(entry, "maxValue", path, number)?,
        modifier: nullable(entry, "modifier", path, number)?,
        // description is not optional; null resets it to empty
        description: nullable(entry, "description", path, string)?
            .map(Option::unwrap_or_default),
        category: nullable(entry, "category", path, string)?,
        formula: nullable(entry, "formula", path, string)?,
    })
}

fn node_list(value: &Value, path: &str) -> Result<Vec<CategoryNodeData>> {
    array(value, path)?
        .iter()
        .enumerate()
        .map(|(index, node)| node_data(node, &format!("{path}[{index}]")))
        .collect()
}

fn node_data(value: &Value, path: &str) -> Result<CategoryNodeData> {
    let node = object(value, path)?;
    let key = optional(node, "key", path, string)?;
    let name = string(required(node, "name", path)?, &member(path, "name"))?;
    let fields = match present(node, "fields") {
        Some(keys) => {
            let keys_path = member(path, "fields");
            array(keys, &keys_path)?
                .iter()
                .enumerate()
                .map(|(index, key)| string(key, &format!("{keys_path}[{index}]")))
                .collect::<Result<Vec<_>>>()?
        }
        None => Vec::new(),
    };
    let categories = match present(node, "categories") {
        Some(children) => Some(node_list(children, &member(path, "categories"))?),
        None => None,
    };
    Ok(CategoryNodeData {
        key,
        name,
        fields,
        categories,
    })
}

fn definition_data(value: &Value, path: &str) -> Result<AttributeDefinitionData> {
    let entry = object(value, path)?;
    let key = string(required(entry, "key", path)?, &member(path, "key"))?;
    let name = string(required(entry, "name", path)?, &member(path, "name"))?;
    let description = optional(entry, "description", path, string)?;
    let is_filtered = optional(entry, "isFiltered", path, boolean)?.unwrap_or(false);
    let known_values = match present(entry, "knownValues") {
        Some(values) => {
            let values_path = member(path, "knownValues");
            array(values, &values_path)?
                .iter()
                .enumerate()
                .map(|(index, value)| string(value, &format!("{values_path}[{index}]")))
                .collect::<Result<Vec<_>>>()?
        }
        None => Vec::new(),
    };
    Ok(AttributeDefinitionData {
        key,
        name,
        description,
        is_filtered,
        known_values,
    })
}

fn member(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

/// Member value, treating `null` as absent.
fn present<'a>(entry: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    entry.get(name).filter(|value| !value.is_null())
}

fn required<'a>(entry: &'a Map<String, Value>, name: &str, path: &str) -> Result<&'a Value> {
    present(entry, name).ok_or_else(|| ProtocolError::shape(member(path, name), "is required"))
}

fn optional<T>(
    entry: &Map<String, Value>,
    name: &str,
    path: &str,
    read: fn(&Value, &str) -> Result<T>,
) -> Result<Option<T>> {
    present(entry, name)
        .map(|value| read(value, &member(path, name)))
        .transpose()
}

/// Absent -> `None`, `null` -> `Some(None)`, value -> `Some(Some(_))`.
fn nullable<T>(
    entry: &Map<String, Value>,
    name: &str,
    path: &str,
    read: fn(&Value, &str) -> Result<T>,
) -> Result<Option<Option<T>>> {
    match entry.get(name) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(value) => read(value, &member(path, name)).map(|v| Some(Some(v))),
    }
}

fn not_null<T>(
    entry: &Map<String, Value>,
    name: &str,
    path: &str,
    read: fn(&Value, &str) -> Result<T>,
) -> Result<Option<T>> {
    match entry.get(name) {
        None => Ok(None),
        Some(Value::Null) => Err(ProtocolError::shape(member(path, name), "cannot be null")),
        Some(value) => read(value, &member(path, name)).map(Some),
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ProtocolError::shape(path, "expected an object"))
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| ProtocolError::shape(path, "expected an array"))
}

fn string(value: &Value, path: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ProtocolError::shape(path, "expected a string"))
}

fn number(value: &Value, path: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ProtocolError::shape(path, "expected a number"))
}

fn boolean(value: &Value, path: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ProtocolError::shape(path, "expected a boolean"))
}
