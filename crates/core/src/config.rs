//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Core
//! code never reads environment variables during request handling; binaries read them and hand
//! the raw values to [`CoreConfig::from_env_values`].

use crate::constants::{DEFAULT_DATABASE_NAME, FILE_URL_PREFIX, MEMORY_DATABASE_URL};
use crate::store::{DocumentStore, FileStore, MemoryStore};
use crate::{ConfigError, ConfigResult};
use mindcheck_types::NonEmptyText;
use std::path::PathBuf;
use std::sync::Arc;

/// Where assessment documents are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// No store configured; persistence and history are disabled.
    Disabled,
    Memory,
    File(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    backend: StoreBackend,
    database_name: String,
    database_url_set: bool,
    database_name_set: bool,
}

impl CoreConfig {
    /// Build configuration from optional `DATABASE_URL` / `DATABASE_NAME` values.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidInput` if a `file://` URL has no path.
    pub fn from_env_values(
        database_url: Option<String>,
        database_name: Option<String>,
    ) -> ConfigResult<Self> {
        let database_url = non_blank(database_url);
        let database_name = non_blank(database_name);

        let backend = match database_url.as_ref().map(NonEmptyText::as_str) {
            None => StoreBackend::Disabled,
            Some(MEMORY_DATABASE_URL) => StoreBackend::Memory,
            Some(url) => {
                let path = url.strip_prefix(FILE_URL_PREFIX).unwrap_or(url);
                if path.is_empty() {
                    return Err(ConfigError::InvalidInput(
                        "DATABASE_URL file:// location has no path".into(),
                    ));
                }
                StoreBackend::File(PathBuf::from(path))
            }
        };

        Ok(Self {
            backend,
            database_name: database_name
                .as_ref()
                .map_or(DEFAULT_DATABASE_NAME, NonEmptyText::as_str)
                .to_string(),
            database_url_set: database_url.is_some(),
            database_name_set: database_name.is_some(),
        })
    }

    /// Configuration with no document store.
    pub fn without_store() -> Self {
        Self {
            backend: StoreBackend::Disabled,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            database_url_set: false,
            database_name_set: false,
        }
    }

    pub fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Whether `DATABASE_URL` was provided.
    pub fn database_url_set(&self) -> bool {
        self.database_url_set
    }

    /// Whether `DATABASE_NAME` was provided.
    pub fn database_name_set(&self) -> bool {
        self.database_name_set
    }
}

fn non_blank(value: Option<String>) -> Option<NonEmptyText> {
    value.and_then(|v| NonEmptyText::new(v).ok())
}

/// Open the document store selected by `cfg`.
///
/// Returns `Ok(None)` when no store is configured.
///
/// # Errors
/// Returns `ConfigError::Store` if the configured store cannot be opened.
pub fn open_store(cfg: &CoreConfig) -> ConfigResult<Option<Arc<dyn DocumentStore>>> {
    let store: Arc<dyn DocumentStore> = match cfg.backend() {
        StoreBackend::Disabled => return Ok(None),
        StoreBackend::Memory => Arc::new(MemoryStore::new(cfg.database_name())),
        StoreBackend::File(base) => Arc::new(FileStore::open(base, cfg.database_name())?),
    };

    tracing::info!("document store `{}` opened ({:?})", store.name(), cfg.backend());
    Ok(Some(store))
}
