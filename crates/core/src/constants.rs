//! Constants used throughout the Mindcheck core crate.

pub use mindcheck_types::MIN_ASSESSMENT_CHARS;

/// Collection that assessment results are persisted into.
pub const ASSESSMENTS_COLLECTION: &str = "assessments";

/// Number of history entries returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Maximum number of collection names reported by diagnostics.
pub const DIAGNOSTICS_COLLECTION_LIMIT: usize = 10;

/// Store name used when `DATABASE_NAME` is not configured.
pub const DEFAULT_DATABASE_NAME: &str = "mindcheck";

/// `DATABASE_URL` value selecting the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Prefix accepted in front of a filesystem `DATABASE_URL`.
pub const FILE_URL_PREFIX: &str = "file://";

/// Numerator of the length penalty: texts up to 99 characters are not damped.
pub const LENGTH_PENALTY_SCALE: f64 = 100.0;

/// Lower bound of the length penalty.
pub const MIN_LENGTH_PENALTY: f64 = 0.5;

/// Upper bound of the length penalty.
pub const MAX_LENGTH_PENALTY: f64 = 1.0;

/// Scores at or above this are labelled `High`.
pub const HIGH_THRESHOLD: f64 = 6.0;

/// Scores at or above this (and below [`HIGH_THRESHOLD`]) are labelled `Moderate`.
pub const MODERATE_THRESHOLD: f64 = 3.0;
