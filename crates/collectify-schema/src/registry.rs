//! Collection registry.
//!
//! The registry maps collection names to schemas. It is assembled once with
//! [`RegistryBuilder`] and never mutated afterwards; share it by reference or `Arc`.

use std::collections::BTreeMap;

use collectify_core::TeamVariant;
use serde::Serialize;
use tracing::debug;

use crate::{
    collections::{POSTS, RESOURCES, TAGS, TEAM, resource_schema, tag_schema, team_schema},
    error::{SchemaConflictError, SchemaError},
    schema::EntitySchema,
};

/// Builder that rejects duplicate collection names.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    collections: BTreeMap<String, EntitySchema>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under `name`.
    pub fn register(
        mut self,
        name: impl Into<String>,
        schema: EntitySchema,
    ) -> Result<Self, SchemaConflictError> {
        let name = name.into();
        if self.collections.contains_key(&name) {
            return Err(SchemaConflictError { name });
        }
        debug!(collection = %name, content_type = schema.content_type.as_str(), "registering collection");
        self.collections.insert(name, schema);
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> CollectionRegistry {
        CollectionRegistry {
            collections: self.collections,
        }
    }
}

/// Immutable mapping from collection name to schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CollectionRegistry {
    collections: BTreeMap<String, EntitySchema>,
}

impl CollectionRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The site's collections: `team`, `tags`, `posts` and `resources`.
    ///
    /// Exactly one team definition is registered, chosen by `team_variant`.
    pub fn standard(team_variant: TeamVariant) -> Result<Self, SchemaConflictError> {
        Ok(Self::builder()
            .register(TEAM, team_schema(team_variant))?
            .register(TAGS, tag_schema())?
            .register(POSTS, resource_schema())?
            .register(RESOURCES, resource_schema())?
            .build())
    }

    /// Look up a schema by collection name.
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.collections.get(name)
    }

    /// Look up a schema, failing with the registered names when `name` is unknown.
    pub fn schema(&self, name: &str) -> Result<&EntitySchema, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownCollection {
            name: name.to_string(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Collection names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Iterate over `(name, schema)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntitySchema)> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether no collection is registered.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Reference fields pointing at collections that are not registered.
    ///
    /// Returns `(collection, field, target)` triples.
    pub fn unknown_targets(&self) -> Vec<(&str, &str, &str)> {
        self.iter()
            .flat_map(|(name, schema)| {
                schema
                    .reference_targets()
                    .into_iter()
                    .filter(move |(_, target)| !self.contains(target))
                    .map(move |(field, target)| (name, field, target))
            })
            .collect()
    }
}
