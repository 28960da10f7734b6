//! Fields - named numeric values on templates and characters
//!
//! A record owns its `FieldMap` and replaces it wholesale on update. Field maps
//! are independent of the category schema: adding, removing or renaming a
//! field never edits the schema tree, it only changes what the resolver sees.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::keys::{CategoryKey, FieldKey};

/// A single named value on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub value: f64,
    /// Upper bound for progress-style fields (HP, stress, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Display-only modifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<f64>,
    #[serde(default)]
    pub description: String,
    /// Category the field would like to live in; only a fallback for fields
    /// the schema does not list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            max_value: None,
            modifier: None,
            description: String::new(),
            category: None,
            formula: None,
        }
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryKey>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Whether this is a bounded (progress-style) field.
    pub fn is_bounded(&self) -> bool {
        self.max_value.is_some()
    }

    fn merge(&mut self, patch: FieldPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(max_value) = patch.max_value {
            self.max_value = max_value;
        }
        if let Some(modifier) = patch.modifier {
            self.modifier = modifier;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(formula) = patch.formula {
            self.formula = formula;
        }
    }
}

/// Partial update for one field.
///
/// Outer `None` leaves a member untouched. For optional members the inner
/// `None` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub max_value: Option<Option<f64>>,
    pub modifier: Option<Option<f64>>,
    pub description: Option<String>,
    pub category: Option<Option<CategoryKey>>,
    pub formula: Option<Option<String>>,
}

impl FieldPatch {
    fn into_new_field(self, key: &FieldKey) -> Result<Field, DomainError> {
        let name = self.name.clone().ok_or_else(|| {
            DomainError::validation(format!("New field '{}' requires a name", key))
        })?;
        let mut field = Field::new(name, 0.0);
        field.merge(self);
        Ok(field)
    }
}

/// Patch for a whole field map. `None` deletes the key.
pub type FieldMapPatch = IndexMap<FieldKey, Option<FieldPatch>>;

/// Insertion-ordered map of a record's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<FieldKey, Field>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<FieldKey>, field: Field) -> Self {
        self.0.insert(key.into(), field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &Field)> {
        self.0.iter()
    }

    /// Add a new field at the end of the map.
    pub fn add_field(&mut self, key: impl Into<FieldKey>, field: Field) -> Result<(), DomainError> {
        let key = key.into();
        if self.0.contains_key(&key) {
            return Err(DomainError::constraint(format!(
                "Field '{}' already exists",
                key
            )));
        }
        self.0.insert(key, field);
        Ok(())
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove_field(&mut self, key: &str) -> Result<Field, DomainError> {
        self.0
            .shift_remove(key)
            .ok_or_else(|| DomainError::not_found("Field", key))
    }

    /// Rename a field key in place.
    pub fn rename_field(&mut self, from: &str, to: impl Into<FieldKey>) -> Result<(), DomainError> {
        let to = to.into();
        if !self.0.contains_key(from) {
            return Err(DomainError::not_found("Field", from));
        }
        if from == to.as_str() {
            return Ok(());
        }
        if self.0.contains_key(&to) {
            return Err(DomainError::constraint(format!(
                "Field '{}' already exists",
                to
            )));
        }
        self.0 = std::mem::take(&mut self.0)
            .into_iter()
            .map(|(key, field)| {
                if key.as_str() == from {
                    (to.clone(), field)
                } else {
                    (key, field)
                }
            })
            .collect();
        Ok(())
    }

    /// Apply a wire patch. Either every entry applies or the map is unchanged.
    pub fn apply_patch(&mut self, patch: FieldMapPatch) -> Result<(), DomainError> {
        let mut next = self.0.clone();
        for (key, entry) in patch {
            match entry {
                None => {
                    next.shift_remove(&key);
                }
                Some(field_patch) => match next.get_mut(&key) {
                    Some(existing) => existing.merge(field_patch),
                    None => {
                        let field = field_patch.into_new_field(&key)?;
                        next.insert(key, field);
                    }
                },
            }
        }
        self.0 = next;
        Ok(())
    }
}

impl FromIterator<(FieldKey, Field)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, Field)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a FieldKey, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, FieldKey, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
