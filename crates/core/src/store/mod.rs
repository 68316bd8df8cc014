//! Document store abstraction.
//!
//! Assessments are persisted on a best-effort basis through a [`DocumentStore`]. The service
//! holds the store as an optional capability: when no store is configured, persistence and
//! history are skipped rather than attempted and failed.
//!
//! Backends:
//! - [`MemoryStore`]: process-local, lost on restart. Useful for development and tests.
//! - [`FileStore`]: one JSON file per document under a collection directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document body: a JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Store-assigned identifier of a document.
///
/// Generated identifiers are 32 lowercase hexadecimal characters (a UUID v7 without hyphens).
/// Identifiers generated by one process sort in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub stored_at: DateTime<Utc>,
    pub body: Document,
}

/// Equality filter over top-level document fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a `field == value` condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, body: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }
}

/// Persistence collaborator for assessment records.
///
/// Every operation is fallible; callers treat failures as degraded service, not as errors.
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Human-readable store name (for diagnostics).
    fn name(&self) -> &str;

    /// Inserts `body` into `collection` and returns the new document's identifier.
    fn create(&self, collection: &str, body: Document) -> StoreResult<DocumentId>;

    /// Returns up to `limit` documents of `collection` matching `filter`, newest first.
    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Names of the collections currently holding documents, sorted.
    fn list_collections(&self) -> StoreResult<Vec<String>>;
}

/// Rejects collection names that are empty or could escape a directory.
///
/// Allowed characters are ASCII letters, digits, `_` and `-`.
pub fn validate_collection_name(collection: &str) -> StoreResult<()> {
    if collection.is_empty() {
        return Err(StoreError::InvalidCollection(
            "collection name cannot be empty".into(),
        ));
    }

    if !collection
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StoreError::InvalidCollection(format!(
            "collection name contains invalid characters: {collection}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_generated_ids_are_canonical_hex() {
        let id = DocumentId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, DocumentId::generate());
    }

    #[test]
    fn test_generated_ids_sort_in_creation_order() {
        let ids: Vec<_> = (0..100).map(|_| DocumentId::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::all().matches(&doc(json!({"label": "Low"}))));
        assert!(Filter::all().matches(&Document::new()));
    }

    #[test]
    fn test_filter_requires_every_field_to_match() {
        let filter = Filter::all().eq("label", "High").eq("score", 7.5);

        assert!(filter.matches(&doc(json!({"label": "High", "score": 7.5, "text": "x"}))));
        assert!(!filter.matches(&doc(json!({"label": "High", "score": 6.0}))));
        assert!(!filter.matches(&doc(json!({"label": "High"}))));
    }

    #[test]
    fn test_validate_collection_name() {
        assert!(validate_collection_name("assessments").is_ok());
        assert!(validate_collection_name("daily_log-2").is_ok());

        for bad in ["", "../etc", "a/b", "with space", "ümlaut"] {
            let err = validate_collection_name(bad).expect_err("should reject");
            assert!(matches!(err, StoreError::InvalidCollection(_)), "{bad}");
        }
    }
}
