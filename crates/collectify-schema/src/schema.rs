//! Entity schemas.
//!
//! A schema is a declarative, ordered list of field specifications plus the
//! content type of the collection it governs.

use std::collections::BTreeMap;

use collectify_core::{ContentType, RawValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{EntryError, ValidationError},
    validator::{FieldKind, FieldValue, raw_type_name, validate_field},
};

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as written in the source file.
    pub name: String,

    /// Validator.
    #[serde(flatten)]
    pub kind: FieldKind,

    /// Whether the field must be present.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl FieldSpec {
    /// Required field.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// Optional field.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Declared shape of a collection's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Data records or documents with front matter.
    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl EntitySchema {
    /// Schema for structured data records.
    pub fn data(fields: Vec<FieldSpec>) -> Self {
        Self {
            content_type: ContentType::Data,
            fields,
        }
    }

    /// Schema for front matter of content documents.
    pub fn content(fields: Vec<FieldSpec>) -> Self {
        Self {
            content_type: ContentType::Content,
            fields,
        }
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Collection names this schema references, in declaration order.
    pub fn reference_targets(&self) -> Vec<(&str, &str)> {
        fn target(kind: &FieldKind) -> Option<&str> {
            match kind {
                FieldKind::Reference { collection } => Some(collection),
                FieldKind::List { item } => target(item),
                _ => None,
            }
        }

        self.fields
            .iter()
            .filter_map(|f| target(&f.kind).map(|c| (f.name.as_str(), c)))
            .collect()
    }

    /// Validate a raw mapping, collecting every field failure.
    ///
    /// Missing optional fields are left out of the result. An explicit `null` is
    /// validated like any other value. Unknown keys are dropped.
    pub fn validate(&self, raw: &RawValue) -> Result<BTreeMap<String, FieldValue>, EntryError> {
        let map = match raw {
            RawValue::Object(map) => map,
            other => {
                return Err(ValidationError::new(
                    "(root)",
                    format!("Expected object, received {}", raw_type_name(other)),
                )
                .into());
            }
        };

        let mut data = BTreeMap::new();
        let mut errors = Vec::new();

        for spec in &self.fields {
            match map.get(&spec.name) {
                None => {
                    if spec.required {
                        errors.push(ValidationError::new(&spec.name, "Required"));
                    }
                }
                Some(value) => match validate_field(&spec.kind, value, &spec.name) {
                    Ok(v) => {
                        data.insert(spec.name.clone(), v);
                    }
                    Err(e) => errors.push(e),
                },
            }
        }

        for key in map.keys().filter(|k| self.field(k).is_none()) {
            debug!(field = %key, "dropping undeclared field");
        }

        if errors.is_empty() {
            Ok(data)
        } else {
            Err(EntryError { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> EntitySchema {
        EntitySchema::data(vec![
            FieldSpec::required("name", FieldKind::string()),
            FieldSpec::optional("aliases", FieldKind::list(FieldKind::string())),
            FieldSpec::optional("mentor", FieldKind::reference("team")),
        ])
    }

    #[test]
    fn test_valid_mapping() {
        let data = schema()
            .validate(&json!({"name": "Jane", "aliases": ["J"]}))
            .expect("valid");
        assert_eq!(data["name"], FieldValue::String("Jane".into()));
        assert_eq!(data["aliases"].as_list().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_missing_required() {
        let err = schema().validate(&json!({})).expect_err("invalid");
        assert_eq!(err.message_at("name"), Some("Required"));
    }

    #[test]
    fn test_null_required_is_type_error() {
        let err = schema().validate(&json!({"name": null})).expect_err("invalid");
        assert_eq!(err.message_at("name"), Some("Expected string, received null"));
    }

    #[test]
    fn test_optional_absent_and_empty() {
        let absent = schema().validate(&json!({"name": "Jane"})).expect("absent");
        assert!(!absent.contains_key("aliases"));

        let empty = schema()
            .validate(&json!({"name": "Jane", "aliases": []}))
            .expect("empty");
        assert_eq!(empty["aliases"], FieldValue::List(vec![]));
    }

    #[test]
    fn test_optional_null_is_type_error() {
        let err = schema()
            .validate(&json!({"name": "Jane", "aliases": null}))
            .expect_err("null is not a list");
        assert_eq!(err.message_at("aliases"), Some("Expected array, received null"));

        let err = schema()
            .validate(&json!({"name": "Jane", "mentor": null}))
            .expect_err("null is not a reference");
        assert!(err.has_path("mentor"));
    }

    #[test]
    fn test_collects_every_failure() {
        let err = schema()
            .validate(&json!({"aliases": [1], "mentor": 5}))
            .expect_err("invalid");
        assert_eq!(err.errors.len(), 3);
        assert!(err.has_path("name"));
        assert!(err.has_path("aliases[0]"));
        assert!(err.has_path("mentor"));
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let data = schema()
            .validate(&json!({"name": "Jane", "shoe_size": 42}))
            .expect("valid");
        assert!(!data.contains_key("shoe_size"));
    }

    #[test]
    fn test_non_object_root() {
        let err = schema().validate(&json!(["Jane"])).expect_err("invalid");
        assert_eq!(err.message_at("(root)"), Some("Expected object, received array"));
    }

    #[test]
    fn test_reference_targets() {
        assert_eq!(schema().reference_targets(), vec![("mentor", "team")]);
    }

    #[test]
    fn test_field_spec_serializes_flat() {
        let spec = FieldSpec::optional("tags", FieldKind::list(FieldKind::reference("tags")));
        assert_eq!(
            serde_json::to_value(&spec).expect("serialize"),
            json!({
                "name": "tags",
                "kind": "list",
                "item": {"kind": "reference", "collection": "tags"},
                "required": false
            })
        );
    }
}
