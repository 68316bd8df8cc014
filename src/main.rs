use api_rest::startup::{build_assessment_service, init_tracing, resolve_rest_addr};

/// Main entry point for the Mindcheck application
///
/// Loads `.env` if present, then serves the REST API (assessment, history, diagnostics and
/// Swagger UI) on a single listener.
///
/// # Environment Variables
/// - `MINDCHECK_REST_ADDR`: REST server address (default: "0.0.0.0:$PORT")
/// - `PORT`: Port used when no address is given (default: "8000")
/// - `DATABASE_URL`: `memory://`, `file://<dir>` or a directory path; unset disables storage
/// - `DATABASE_NAME`: Store name under `DATABASE_URL` (default: "mindcheck")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing("mindcheck_run=info")?;

    let rest_addr = resolve_rest_addr(
        std::env::var("MINDCHECK_REST_ADDR").ok(),
        std::env::var("PORT").ok(),
    );

    tracing::info!("++ Starting Mindcheck REST on {}", rest_addr);

    let service = build_assessment_service(
        std::env::var("DATABASE_URL").ok(),
        std::env::var("DATABASE_NAME").ok(),
    )?;
    tracing::info!(
        "++ Document store {}",
        if service.store_available() { "enabled" } else { "disabled" }
    );

    let rest_app = api_rest::router(service);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}
