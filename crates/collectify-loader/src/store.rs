//! Loaded content store.

use std::collections::{BTreeMap, HashMap};

use collectify_schema::{Entry, ReferenceResolver};

use crate::loader::LoaderError;

/// Validated entries of every collection, keyed by collection and id.
#[derive(Debug, Default)]
pub struct ContentStore {
    collections: HashMap<String, BTreeMap<String, Entry>>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Ids are unique per collection.
    pub fn insert(&mut self, entry: Entry) -> Result<(), LoaderError> {
        let entries = self.collections.entry(entry.collection.clone()).or_default();
        if let Some(existing) = entries.get(&entry.id) {
            return Err(LoaderError::DuplicateEntry {
                collection: entry.collection,
                id: entry.id,
                first: existing.source.clone(),
                second: entry.source,
            });
        }
        entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    /// Get an entry.
    pub fn get(&self, collection: &str, id: &str) -> Option<&Entry> {
        self.collections.get(collection)?.get(id)
    }

    /// Entries of a collection sorted by id.
    pub fn entries(&self, collection: &str) -> Vec<&Entry> {
        self.collections
            .get(collection)
            .map(|entries| entries.values().collect())
            .unwrap_or_default()
    }

    /// Every entry of every collection.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.collections.values().flat_map(BTreeMap::values)
    }

    /// Number of entries in one collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReferenceResolver for ContentStore {
    fn lookup(&self, collection: &str, id: &str) -> Option<&Entry> {
        self.get(collection, id)
    }
}
