//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the Mindcheck REST API server on its own, without loading `.env`.
//!
//! ## Intended use
//! Useful for development and container images that inject configuration directly. The
//! workspace's main `mindcheck-run` binary serves the same router after loading `.env`.

use api_rest::startup::{build_assessment_service, init_tracing, resolve_rest_addr};

/// Main entry point for the Mindcheck REST API server
///
/// # Environment Variables
/// - `MINDCHECK_REST_ADDR`: Server address (default: "0.0.0.0:$PORT")
/// - `PORT`: Port used when no address is given (default: "8000")
/// - `DATABASE_URL`: `memory://`, `file://<dir>` or a directory path (optional)
/// - `DATABASE_NAME`: Store name under `DATABASE_URL` (default: "mindcheck")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the document store configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("api_rest=info")?;

    let addr = resolve_rest_addr(
        std::env::var("MINDCHECK_REST_ADDR").ok(),
        std::env::var("PORT").ok(),
    );

    tracing::info!("-- Starting Mindcheck REST API on {}", addr);

    let service = build_assessment_service(
        std::env::var("DATABASE_URL").ok(),
        std::env::var("DATABASE_NAME").ok(),
    )?;

    let app = api_rest::router(service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
