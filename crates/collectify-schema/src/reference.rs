//! Cross-collection references.
//!
//! Validation only produces [`Reference`] descriptors. Whoever owns the loaded
//! entries implements [`ReferenceResolver`] and resolves them once every collection
//! has been loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{entry::Entry, error::ReferenceNotFoundError};

/// Typed pointer to an entry of another collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Target collection name.
    pub collection: String,

    /// Collection-scoped entry id.
    pub id: String,
}

impl Reference {
    /// Create a new reference.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.id)
    }
}

/// Lookup of loaded entries by collection and id.
pub trait ReferenceResolver {
    /// Find an entry, if loaded.
    fn lookup(&self, collection: &str, id: &str) -> Option<&Entry>;

    /// Resolve a reference or fail naming the missing collection and key.
    fn resolve(&self, reference: &Reference) -> Result<&Entry, ReferenceNotFoundError> {
        self.lookup(&reference.collection, &reference.id)
            .ok_or_else(|| ReferenceNotFoundError {
                collection: reference.collection.clone(),
                id: reference.id.clone(),
            })
    }

    /// Resolve a list of references, keeping order and duplicates.
    fn resolve_all(&self, references: &[Reference]) -> Result<Vec<&Entry>, ReferenceNotFoundError> {
        references.iter().map(|r| self.resolve(r)).collect()
    }
}
