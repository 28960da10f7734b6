//! Field and field-patch wire shapes

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use sheetkeep_domain::{CategoryKey, Field, FieldKey, FieldMapPatch, FieldPatch};

/// Full field as stored on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl From<FieldData> for Field {
    fn from(data: FieldData) -> Self {
        Field {
            name: data.name,
            value: data.value,
            max_value: data.max_value,
            modifier: data.modifier,
            description: data.description,
            category: data.category.map(CategoryKey::from),
            formula: data.formula,
        }
    }
}

impl From<&Field> for FieldData {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value,
            max_value: field.max_value,
            modifier: field.modifier,
            description: field.description.clone(),
            category: field.category.as_ref().map(ToString::to_string),
            formula: field.formula.clone(),
        }
    }
}

/// Partial field update. Absent members are untouched; `null` clears an
/// optional member and resets `description` to empty. `name` and `value`
/// cannot be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatchData {
    #[serde(
        default,
        deserialize_with = "not_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "not_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_value: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modifier: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub formula: Option<Option<String>>,
}

/// Patch for a whole field map; a `null` entry deletes the field.
pub type FieldMapPatchData = IndexMap<String, Option<FieldPatchData>>;

// Present-but-null becomes `Some(None)`; absence is handled by `default`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn not_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| D::Error::custom("cannot be null"))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

impl From<FieldPatchData> for FieldPatch {
    fn from(data: FieldPatchData) -> Self {
        FieldPatch {
            name: data.name,
            value: data.value,
            max_value: data.max_value,
            modifier: data.modifier,
            description: data.description,
            category: data.category.map(|category| category.map(CategoryKey::from)),
            formula: data.formula,
        }
    }
}

pub fn into_field_map_patch(data: FieldMapPatchData) -> FieldMapPatch {
    data.into_iter()
        .map(|(key, patch)| (FieldKey::from(key), patch.map(FieldPatch::from)))
        .collect()
}
