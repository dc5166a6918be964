//! Error types for schema validation and reference resolution.

use std::fmt;

use thiserror::Error;

/// A field failed its validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Path of the offending field (`title`, `tags[1]`).
    pub path: String,

    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A reference does not resolve in its target collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reference not found: no entry '{id}' in collection '{collection}'")]
pub struct ReferenceNotFoundError {
    /// Target collection.
    pub collection: String,

    /// Missing key.
    pub id: String,
}

/// Two schemas registered under one collection name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema conflict: collection '{name}' is already registered")]
pub struct SchemaConflictError {
    /// Conflicting collection name.
    pub name: String,
}

/// Every field failure of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct EntryError {
    /// Individual failures in field declaration order.
    pub errors: Vec<ValidationError>,
}

impl EntryError {
    /// Whether a failure was reported at `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }

    /// Find the message reported at `path`.
    pub fn message_at(&self, path: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<ValidationError> for EntryError {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Errors raised while assembling or querying the registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Duplicate registration.
    #[error(transparent)]
    SchemaConflict(#[from] SchemaConflictError),

    /// Lookup of a collection that is not registered.
    #[error("unknown collection '{name}' (known: {known})")]
    UnknownCollection { name: String, known: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("title", "Title must be 100 characters or less");
        assert_eq!(err.to_string(), "title: Title must be 100 characters or less");
    }

    #[test]
    fn test_reference_not_found_names_collection_and_key() {
        let err = ReferenceNotFoundError {
            collection: "team".into(),
            id: "ghost".into(),
        };
        assert!(err.to_string().contains("team"));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_schema_conflict_display() {
        let err = SchemaConflictError { name: "team".into() };
        assert_eq!(
            err.to_string(),
            "schema conflict: collection 'team' is already registered"
        );
    }

    #[test]
    fn test_entry_error_lookup() {
        let err = EntryError {
            errors: vec![
                ValidationError::new("title", "Required"),
                ValidationError::new("tags[0]", "Expected string, received number"),
            ],
        };
        assert!(err.has_path("tags[0]"));
        assert_eq!(err.message_at("title"), Some("Required"));
        assert!(err.to_string().contains("title: Required; tags[0]"));
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: SchemaError = SchemaConflictError { name: "tags".into() }.into();
        assert!(matches!(err, SchemaError::SchemaConflict(_)));
    }
}
