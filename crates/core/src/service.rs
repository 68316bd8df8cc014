//! Assessment service.
//!
//! Wraps the scorer with best-effort persistence. The document store is an optional capability
//! fixed at construction: without one, assessments are returned without an `id` and history is
//! empty. Store failures are logged and otherwise swallowed; they never fail a request.

use crate::config::CoreConfig;
use crate::constants::{ASSESSMENTS_COLLECTION, DIAGNOSTICS_COLLECTION_LIMIT};
use crate::scorer::{self, AssessmentResult, Label};
use crate::store::{Document, DocumentId, DocumentStore, Filter, StoredDocument};
use crate::{AssessmentError, StoreError, StoreResult};
use api_shared::{DiagnosticsRes, HistoryItem};
use chrono::{DateTime, Utc};
use mindcheck_types::AssessmentText;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DIAGNOSTICS_ERROR_CHARS: usize = 50;

/// Persisted form of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AssessmentRecord {
    text: String,
    score: f64,
    label: Label,
    keywords: Vec<String>,
    created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    fn new(text: &AssessmentText, result: &AssessmentResult) -> Self {
        Self {
            text: text.as_str().to_string(),
            score: result.score,
            label: result.label,
            keywords: result.keywords.clone(),
            created_at: result.created_at,
        }
    }

    fn to_document(&self) -> StoreResult<Document> {
        match serde_json::to_value(self).map_err(StoreError::Serialization)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(StoreError::Serialization(serde::ser::Error::custom(
                "assessment record is not a JSON object",
            ))),
        }
    }

    fn from_stored(doc: StoredDocument) -> StoreResult<HistoryItem> {
        let record: AssessmentRecord =
            serde_json::from_value(serde_json::Value::Object(doc.body))
                .map_err(StoreError::Deserialization)?;

        Ok(HistoryItem {
            id: doc.id.to_string(),
            text: record.text,
            score: record.score,
            label: record.label.to_string(),
            keywords: record.keywords,
            created_at: record.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct AssessmentService {
    cfg: Arc<CoreConfig>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AssessmentService {
    pub fn new(cfg: Arc<CoreConfig>, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { cfg, store }
    }

    pub fn store_available(&self) -> bool {
        self.store.is_some()
    }

    /// Validates `text`, scores it and persists the result if a store is available.
    ///
    /// # Errors
    /// Returns `AssessmentError::TextTooShort` if `text` has fewer than 10 characters. The
    /// scorer is not run in that case.
    pub fn assess(&self, text: impl Into<String>) -> Result<AssessmentResult, AssessmentError> {
        let text = AssessmentText::new(text)?;
        Ok(self.assess_text(&text))
    }

    /// Scores already-validated text and persists the result if a store is available.
    pub fn assess_text(&self, text: &AssessmentText) -> AssessmentResult {
        let mut result = scorer::score(text.as_str());
        result.id = self.persist(text, &result);
        result
    }

    fn persist(&self, text: &AssessmentText, result: &AssessmentResult) -> Option<DocumentId> {
        let store = self.store.as_ref()?;

        let stored = AssessmentRecord::new(text, result)
            .to_document()
            .and_then(|doc| store.create(ASSESSMENTS_COLLECTION, doc));

        match stored {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("assessment not persisted: {}", e);
                None
            }
        }
    }

    /// Returns up to `limit` most recent assessments, newest first.
    ///
    /// Yields an empty list when no store is configured or the store fails. Stored documents
    /// that are not valid assessments are skipped and do not count towards `limit`.
    pub fn history(&self, limit: usize) -> Vec<HistoryItem> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        // Unbounded: the limit applies to valid assessments only.
        let docs = match store.query(ASSESSMENTS_COLLECTION, &Filter::all(), usize::MAX) {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!("history unavailable: {}", e);
                return Vec::new();
            }
        };

        docs.into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                match AssessmentRecord::from_stored(doc) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!("skipping stored document {}: {}", id, e);
                        None
                    }
                }
            })
            .take(limit)
            .collect()
    }

    /// Reports store availability and configuration presence.
    ///
    /// Never runs the scorer.
    pub fn diagnostics(&self) -> DiagnosticsRes {
        let (database, connection_status, collections) = match self.store.as_ref() {
            None => ("Not Available".to_string(), "Not Connected", Vec::new()),
            Some(store) => match store.list_collections() {
                Ok(collections) => (
                    "Connected & Working".to_string(),
                    "Connected",
                    collections
                        .into_iter()
                        .take(DIAGNOSTICS_COLLECTION_LIMIT)
                        .collect(),
                ),
                Err(e) => {
                    let detail: String =
                        e.to_string().chars().take(DIAGNOSTICS_ERROR_CHARS).collect();
                    (
                        format!("Connected but Error: {detail}"),
                        "Connected",
                        Vec::new(),
                    )
                }
            },
        };

        DiagnosticsRes {
            backend: "Running".into(),
            database,
            database_url: set_or_not(self.cfg.database_url_set()),
            database_name: set_or_not(self.cfg.database_name_set()),
            connection_status: connection_status.into(),
            collections,
        }
    }
}

fn set_or_not(set: bool) -> String {
    let status = if set { "Set" } else { "Not Set" };
    status.to_string()
}
