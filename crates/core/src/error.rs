#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("text must be at least {min} characters (got {actual})")]
    TextTooShort { min: usize, actual: usize },
}

impl From<mindcheck_types::TextTooShort> for AssessmentError {
    fn from(err: mindcheck_types::TextTooShort) -> Self {
        AssessmentError::TextTooShort {
            min: err.min,
            actual: err.actual,
        }
    }
}

/// Failures reported by a [`DocumentStore`](crate::store::DocumentStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("store is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to create store directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to write document: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read document: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidInput(String),
    #[error("failed to open document store: {0}")]
    Store(#[from] StoreError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
