//! `SchemaRegistry` — component type name → `Schema`.
//!
//! A second registration of the same name is rejected: two definitions of
//! one type would make existing save files ambiguous.

use std::collections::HashMap;

use crate::{FieldSpec, Schema, SchemaError, SchemaResult};

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the field list of `type_name`.
    ///
    /// Fails if the name is taken or a key repeats within `fields`; the
    /// registry is unchanged on failure.
    pub fn register(&mut self, type_name: &str, fields: Vec<FieldSpec>) -> SchemaResult<()> {
        if self.schemas.contains_key(type_name) {
            return Err(SchemaError::DuplicateType(type_name.to_owned()));
        }
        let schema = Schema::new(type_name, fields)?;
        self.schemas.insert(type_name.to_owned(), schema);
        Ok(())
    }

    pub fn get_schema(&self, type_name: &str) -> Option<&Schema> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered type names in ascending order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
