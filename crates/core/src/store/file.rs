//! Filesystem-backed document store.
//!
//! # Layout
//!
//! ```text
//! <root>/                        # DATABASE_URL joined with DATABASE_NAME
//! └── <collection>/
//!     └── <32hex-id>.json        # StoredDocument, pretty-printed
//! ```
//!
//! Documents are written to a `.tmp` sibling and renamed into place so a reader never sees a
//! half-written file. Files that fail to parse are skipped with a warning rather than failing
//! the whole query.

use super::{validate_collection_name, Document, DocumentId, DocumentStore, Filter, StoredDocument};
use crate::{StoreError, StoreResult};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

#[derive(Debug)]
pub struct FileStore {
    name: String,
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `base_dir/name`.
    ///
    /// # Errors
    /// Returns `StoreError::DirCreation` if the root directory cannot be created.
    pub fn open(base_dir: &Path, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        validate_collection_name(&name)
            .map_err(|_| StoreError::Unavailable(format!("invalid store name: {name}")))?;

        let root = base_dir.join(&name);
        fs::create_dir_all(&root).map_err(StoreError::DirCreation)?;

        Ok(Self { name, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> StoreResult<PathBuf> {
        validate_collection_name(collection)?;
        Ok(self.root.join(collection))
    }

    fn read_document(path: &Path) -> StoreResult<StoredDocument> {
        let contents = fs::read_to_string(path).map_err(StoreError::FileRead)?;
        serde_json::from_str(&contents).map_err(StoreError::Deserialization)
    }
}

/// Writes `contents` to `temp_path` and renames it over `final_path`.
///
/// The temporary file is removed if either step fails.
fn write_atomically(temp_path: &Path, final_path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let result = fs::write(temp_path, contents).and_then(|()| fs::rename(temp_path, final_path));
    if result.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    result
}

impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, collection: &str, body: Document) -> StoreResult<DocumentId> {
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir).map_err(StoreError::DirCreation)?;

        let document = StoredDocument {
            id: DocumentId::generate(),
            stored_at: Utc::now(),
            body,
        };

        let contents = serde_json::to_string_pretty(&document).map_err(StoreError::Serialization)?;
        let final_path = dir.join(format!("{}.{DOCUMENT_EXTENSION}", document.id));
        let temp_path = dir.join(format!("{}.{TEMP_EXTENSION}", document.id));

        write_atomically(&temp_path, &final_path, contents.as_bytes())
            .map_err(StoreError::FileWrite)?;

        tracing::debug!("stored document {} in {}", document.id, dir.display());
        Ok(document.id)
    }

    fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<StoredDocument>> {
        let dir = self.collection_dir(collection)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(&dir).map_err(StoreError::FileRead)?.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }

            match Self::read_document(&path) {
                Ok(doc) if filter.matches(&doc.body) => documents.push(doc),
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping unreadable document {}: {}", path.display(), e),
            }
        }

        // Ids are time-ordered, so they break `stored_at` ties newest first as well.
        documents.sort_by(|a, b| {
            b.stored_at
                .cmp(&a.stored_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        documents.truncate(limit);
        Ok(documents)
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut collections: Vec<String> = fs::read_dir(&self.root)
            .map_err(StoreError::FileRead)?
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();

        collections.sort();
        Ok(collections)
    }
}
