//! # API REST
//!
//! REST API implementation for Mindcheck.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! Scoring and persistence live in `mindcheck-core`; this crate only maps them onto HTTP.

#![warn(rust_2018_idioms)]

pub mod startup;

use api_shared::{
    AssessReq, AssessmentRes, DiagnosticsRes, HealthRes, HealthService, HistoryItem, HistoryQuery,
    MessageRes,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use mindcheck_core::{AssessmentError, AssessmentService, DEFAULT_HISTORY_LIMIT};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Shared by every request handler. The service is cheap to clone; the document store inside it
/// is reference counted.
#[derive(Clone)]
pub struct AppState {
    assessment_service: AssessmentService,
}

#[derive(OpenApi)]
#[openapi(
    paths(root, hello, health, diagnostics, assess, history),
    components(schemas(
        HealthRes,
        MessageRes,
        AssessReq,
        AssessmentRes,
        HistoryItem,
        DiagnosticsRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router around `assessment_service`.
///
/// CORS is permissive: any origin, method and header is allowed.
pub fn router(assessment_service: AssessmentService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/health", get(health))
        .route("/test", get(diagnostics))
        .route("/api/assess", post(assess))
        .route("/api/history", get(history))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { assessment_service })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn root() -> Json<MessageRes> {
    Json(MessageRes {
        message: "Hello from the Mindcheck backend!".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/hello",
    responses(
        (status = 200, description = "Greeting", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn hello() -> Json<MessageRes> {
    Json(MessageRes {
        message: "Hello from the backend API!".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Runs a service call on tokio's blocking pool.
///
/// Store backends do synchronous I/O, so every handler that may reach the store goes through here.
async fn run_blocking<T, F>(call: F) -> Result<T, (StatusCode, &'static str)>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call).await.map_err(|e| {
        tracing::error!("service task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })
}

#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Store availability and configuration", body = DiagnosticsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Report whether a document store is available and which settings were configured
#[axum::debug_handler]
async fn diagnostics(
    State(state): State<AppState>,
) -> Result<Json<DiagnosticsRes>, (StatusCode, &'static str)> {
    let service = state.assessment_service;
    let res = run_blocking(move || service.diagnostics()).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/api/assess",
    request_body = AssessReq,
    responses(
        (status = 200, description = "Scored assessment", body = AssessmentRes),
        (status = 422, description = "Text shorter than 10 characters"),
        (status = 500, description = "Internal server error")
    )
)]
/// Assess stress level from a free-text description
///
/// Scores the text and stores the result when a document store is available. Storage is best
/// effort: if it fails the assessment is still returned, with `id` set to `null`.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - `text` has fewer than 10 characters.
#[axum::debug_handler]
async fn assess(
    State(state): State<AppState>,
    Json(req): Json<AssessReq>,
) -> Result<Json<AssessmentRes>, (StatusCode, &'static str)> {
    let service = state.assessment_service;
    match run_blocking(move || service.assess(req.text)).await? {
        Ok(result) => Ok(Json(result.into())),
        Err(AssessmentError::TextTooShort { actual, .. }) => {
            tracing::debug!("rejected assessment text of {} characters", actual);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "text must be at least 10 characters",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Most recent assessments, newest first", body = [HistoryItem]),
        (status = 500, description = "Internal server error")
    )
)]
/// Return recent assessment history
///
/// Returns an empty list when no document store is available.
#[axum::debug_handler]
async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryItem>>, (StatusCode, &'static str)> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let service = state.assessment_service;
    let items = run_blocking(move || service.history(limit)).await?;
    Ok(Json(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use mindcheck_core::{CoreConfig, DocumentStore, FileStore, MemoryStore};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app_without_store() -> Router {
        router(AssessmentService::new(
            Arc::new(CoreConfig::without_store()),
            None,
        ))
    }

    fn app_with_memory_store() -> (Router, Arc<MemoryStore>) {
        let cfg = CoreConfig::from_env_values(Some("memory://".into()), None).unwrap();
        let store = Arc::new(MemoryStore::new("test"));
        let service = AssessmentService::new(Arc::new(cfg), Some(store.clone()));
        (router(service), store)
    }

    fn app_with_file_store(dir: &TempDir) -> Router {
        let url = dir.path().to_string_lossy().into_owned();
        let cfg = CoreConfig::from_env_values(Some(url), None).unwrap();
        let store = Arc::new(FileStore::open(dir.path(), "mindcheck").unwrap());
        router(AssessmentService::new(Arc::new(cfg), Some(store)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn assess_request(text: &str) -> Request<Body> {
        let body = serde_json::json!({ "text": text }).to_string();
        Request::builder()
            .method(Method::POST)
            .uri("/api/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (status, body) = send(app_without_store(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);

        let res: HealthRes = serde_json::from_slice(&body).unwrap();
        assert!(res.ok);
    }

    #[tokio::test]
    async fn test_greetings() {
        let (status, body) = send(app_without_store(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        let res: MessageRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.message, "Hello from the Mindcheck backend!");

        let (status, body) = send(app_without_store(), get_request("/api/hello")).await;
        assert_eq!(status, StatusCode::OK);
        let res: MessageRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.message, "Hello from the backend API!");
    }

    #[tokio::test]
    async fn test_assess_scores_text_without_store() {
        let (status, body) = send(
            app_without_store(),
            assess_request("I feel so stressed and overwhelmed, I am exhausted"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["score"], 7.5);
        assert_eq!(json["label"], "High");
        assert_eq!(
            json["keywords"],
            serde_json::json!(["stress", "stressed", "overwhelmed", "exhausted"])
        );
        assert!(json["id"].is_null());
        assert!(json["created_at"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_assess_rejects_short_text_before_scoring() {
        let (app, store) = app_with_memory_store();
        let (status, _) = send(app, assess_request("sad")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.list_collections().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assess_rejects_missing_text() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let (status, _) = send(app_without_store(), request).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_assess_persists_and_history_returns_it() {
        let (app, _store) = app_with_memory_store();

        let (status, body) = send(app.clone(), assess_request("nervous about the panic")).await;
        assert_eq!(status, StatusCode::OK);
        let created: AssessmentRes = serde_json::from_slice(&body).unwrap();
        let id = created.id.expect("should be persisted");

        let (status, body) = send(app, get_request("/api/history")).await;
        assert_eq!(status, StatusCode::OK);
        let history: Vec<HistoryItem> = serde_json::from_slice(&body).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, id);
        assert_eq!(history[0].text, "nervous about the panic");
        assert_eq!(history[0].keywords, vec!["panic", "nervous"]);
        assert_eq!(history[0].score, 3.0);
    }

    #[tokio::test]
    async fn test_history_limit_query() {
        let (app, _store) = app_with_memory_store();
        for _ in 0..4 {
            let (status, _) = send(app.clone(), assess_request("worry and more worry")).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = send(app.clone(), get_request("/api/history?limit=2")).await;
        let history: Vec<HistoryItem> = serde_json::from_slice(&body).unwrap();
        assert_eq!(history.len(), 2);

        let (_, body) = send(app, get_request("/api/history")).await;
        let history: Vec<HistoryItem> = serde_json::from_slice(&body).unwrap();
        assert_eq!(history.len(), 4);
    }

    #[tokio::test]
    async fn test_file_store_round_trip_through_handlers() {
        let dir = TempDir::new().unwrap();
        let app = app_with_file_store(&dir);

        let (status, body) = send(app.clone(), assess_request("hopeless and so tired")).await;
        assert_eq!(status, StatusCode::OK);
        let created: AssessmentRes = serde_json::from_slice(&body).unwrap();
        let id = created.id.expect("should be persisted");
        assert!(
            dir.path()
                .join("mindcheck")
                .join("assessments")
                .join(format!("{id}.json"))
                .is_file()
        );

        let (status, body) = send(app.clone(), get_request("/api/history?limit=1")).await;
        assert_eq!(status, StatusCode::OK);
        let history: Vec<HistoryItem> = serde_json::from_slice(&body).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, id);

        let (status, body) = send(app, get_request("/test")).await;
        assert_eq!(status, StatusCode::OK);
        let res: DiagnosticsRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.collections, vec!["assessments"]);
    }

    #[tokio::test]
    async fn test_history_without_store_is_empty_list() {
        let (status, body) = send(app_without_store(), get_request("/api/history")).await;
        assert_eq!(status, StatusCode::OK);
        let history: Vec<HistoryItem> = serde_json::from_slice(&body).unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_diagnostics_reports_store_state() {
        let (status, body) = send(app_without_store(), get_request("/test")).await;
        assert_eq!(status, StatusCode::OK);
        let res: DiagnosticsRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.database, "Not Available");
        assert_eq!(res.database_url, "Not Set");

        let (app, _store) = app_with_memory_store();
        let (_, body) = send(app, get_request("/test")).await;
        let res: DiagnosticsRes = serde_json::from_slice(&body).unwrap();
        assert_eq!(res.database, "Connected & Working");
        assert_eq!(res.connection_status, "Connected");
        assert_eq!(res.database_url, "Set");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://example.org")
            .body(Body::empty())
            .unwrap();

        let response = app_without_store().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (status, body) = send(app_without_store(), get_request("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/api/assess"].is_object());
        assert!(json["paths"]["/api/history"].is_object());
    }
}
