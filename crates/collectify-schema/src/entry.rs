//! Validated collection entries.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Serialize;

use crate::{
    reference::Reference,
    validator::{FieldValue, ImageRef},
};

/// One validated entry of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Owning collection name.
    pub collection: String,

    /// Collection-scoped identifier.
    pub id: String,

    /// Validated fields. Absent optional fields are not present.
    pub data: BTreeMap<String, FieldValue>,

    /// Raw document body (content collections only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Source file.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Entry {
    /// Create an empty entry.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            data: BTreeMap::new(),
            body: None,
            source: PathBuf::new(),
        }
    }

    /// Set the validated fields.
    #[must_use]
    pub fn with_data(mut self, data: BTreeMap<String, FieldValue>) -> Self {
        self.data = data;
        self
    }

    /// Set the document body.
    #[must_use]
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// Set the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    /// Get a string field.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    /// Get a single-reference field.
    pub fn reference(&self, field: &str) -> Option<&Reference> {
        self.get(field).and_then(FieldValue::as_reference)
    }

    /// Get a list-of-references field. Absent and empty both yield no references.
    pub fn reference_list(&self, field: &str) -> Vec<Reference> {
        self.get(field)
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(FieldValue::as_reference)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every reference this entry carries, with its field path.
    pub fn references(&self) -> Vec<(String, &Reference)> {
        let mut found = Vec::new();
        for (name, value) in &self.data {
            value.walk(name, &mut |path, v| {
                if let FieldValue::Reference(r) = v {
                    found.push((path.to_string(), r));
                }
            });
        }
        found
    }

    /// Every image this entry carries, with its field path.
    pub fn images(&self) -> Vec<(String, &ImageRef)> {
        let mut found = Vec::new();
        for (name, value) in &self.data {
            value.walk(name, &mut |path, v| {
                if let FieldValue::Image(i) = v {
                    found.push((path.to_string(), i));
                }
            });
        }
        found
    }
}
