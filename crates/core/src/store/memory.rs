use super::{validate_collection_name, Document, DocumentId, DocumentStore, Filter, StoredDocument};
use crate::{StoreError, StoreResult};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-process document store.
///
/// Documents are kept per collection in insertion order, so "newest first" is simply reverse
/// insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, collection: &str, body: Document) -> StoreResult<DocumentId> {
        validate_collection_name(collection)?;

        let document = StoredDocument {
            id: DocumentId::generate(),
            stored_at: Utc::now(),
            body,
        };
        let id = document.id.clone();

        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>> {
        validate_collection_name(collection)?;

        let collections = self.collections.read().map_err(poisoned)?;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .rev()
            .filter(|doc| filter.matches(&doc.body))
            .take(limit)
            .cloned()
            .collect())
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.keys().cloned().collect())
    }
}
