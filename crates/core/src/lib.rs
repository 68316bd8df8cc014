//! # Mindcheck Core
//!
//! Core logic for the Mindcheck assessment service:
//! - A fixed keyword [`lexicon`] and the rule-based [`scorer`]
//! - The [`store`] abstraction with in-memory and file-backed backends
//! - Startup [`config`] resolution
//! - [`AssessmentService`], which scores text and persists results on a best-effort basis
//!
//! **No API concerns**: HTTP servers, routing and CLI parsing belong in `api-rest` and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod lexicon;
pub mod scorer;
pub mod service;
pub mod store;

pub use config::{open_store, CoreConfig, StoreBackend};
pub use constants::*;
pub use error::{AssessmentError, ConfigError, ConfigResult, StoreError, StoreResult};
pub use lexicon::{Lexicon, LexiconEntry};
pub use scorer::{length_penalty, score, AssessmentResult, Label};
pub use service::AssessmentService;
pub use store::{
    Document, DocumentId, DocumentStore, FileStore, Filter, MemoryStore, StoredDocument,
};
