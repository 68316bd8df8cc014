//! # API Shared
//!
//! Shared definitions for the Mindcheck APIs.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `mindcheck-core`, `api-rest` and the CLI for common functionality.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
