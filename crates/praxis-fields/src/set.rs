//! A named collection of fields applied to a payload.

use indexmap::IndexMap;
use praxis_core::Map;
#[cfg(test)]
use praxis_core::Value;

use crate::error::FieldError;
use crate::field::Field;

/// An insertion-ordered mapping of payload key to [`Field`], built once at
/// resource definition time.
///
/// Every field knows its own name after insertion, so validation messages
/// can name the offending key.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: IndexMap<String, Field>,
}

impl FieldSet {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field under the given name, stamping the name on the field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.insert(name, field);
        self
    }

    /// Inserts a field under the given name, stamping the name on the field.
    pub fn insert(&mut self, name: impl Into<String>, mut field: Field) {
        let name = name.into();
        field.set_name(&name);
        self.fields.insert(name, field);
    }

    /// Returns the declared field names, in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns `true` if a field is declared under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the field declared under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a payload.
    ///
    /// Drops keys with no declared field, validates each present field,
    /// then computes the required set against the cleaned result; the
    /// first required field missing from the cleaned data fails the whole
    /// payload, naming that field.
    pub fn validate(&self, data: &Map) -> Result<Map, FieldError> {
        let mut cleaned = Map::new();
        for (name, value) in data {
            let Some(field) = self.fields.get(name) else {
                continue;
            };
            cleaned.insert(name.clone(), field.validate(value)?);
        }

        for (name, field) in &self.fields {
            if field.requirement().evaluate(&cleaned) && !cleaned.contains_key(name) {
                return Err(FieldError::invalid(format!("Field \"{name}\" is missing")));
            }
        }

        Ok(cleaned)
    }
}
