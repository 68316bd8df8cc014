//! Process startup shared by the REST binaries.
//!
//! Environment variables are read by the binaries and passed in here as plain values, so this
//! module can be tested without touching the process environment.

use anyhow::Context;
use mindcheck_core::{open_store, AssessmentService, CoreConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Port used when neither `MINDCHECK_REST_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: &str = "8000";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes effect on top of `default_directive` (for example `"api_rest=info"`).
///
/// # Errors
/// Returns an error if `default_directive` is not a valid filter directive.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse()?)
                .add_directive("mindcheck_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}

/// Resolve the bind address.
///
/// An explicit address wins; otherwise the server listens on all interfaces at `port`, falling
/// back to [`DEFAULT_PORT`].
pub fn resolve_rest_addr(rest_addr: Option<String>, port: Option<String>) -> String {
    if let Some(addr) = rest_addr.filter(|a| !a.trim().is_empty()) {
        return addr;
    }

    let port = port
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PORT.into());
    format!("0.0.0.0:{port}")
}

/// Build the assessment service from `DATABASE_URL` / `DATABASE_NAME` values.
///
/// A store that is configured but cannot be opened is logged and skipped: the service then runs
/// without persistence.
///
/// # Errors
/// Returns an error if the configuration values themselves are invalid.
pub fn build_assessment_service(
    database_url: Option<String>,
    database_name: Option<String>,
) -> anyhow::Result<AssessmentService> {
    let cfg = Arc::new(
        CoreConfig::from_env_values(database_url, database_name)
            .context("invalid document store configuration")?,
    );

    let store = match open_store(&cfg) {
        Ok(Some(store)) => Some(store),
        Ok(None) => {
            tracing::info!("no DATABASE_URL configured; assessments will not be stored");
            None
        }
        Err(e) => {
            tracing::warn!("document store unavailable, continuing without it: {}", e);
            None
        }
    };

    Ok(AssessmentService::new(cfg, store))
}
