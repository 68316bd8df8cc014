//! Request and response bodies shared by the REST API and the CLI.
//!
//! Everything here is plain serde data with an OpenAPI schema; the domain types live in
//! `mindcheck-core` and convert into these at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// Body of `POST /api/assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessReq {
    /// User journal or symptoms description (at least 10 characters)
    #[schema(min_length = 10)]
    pub text: String,
}

/// Scored assessment as returned to the caller.
///
/// `id` is `null` unless the result was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRes {
    pub score: f64,
    pub label: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of assessments to return (default 10)
    pub limit: Option<usize>,
}

/// A stored assessment with the store identifier exposed as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryItem {
    pub id: String,
    pub text: String,
    pub score: f64,
    pub label: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Store availability and configuration report served by `GET /test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsRes {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}
