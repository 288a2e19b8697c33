use crate::error::{TrendingError, UpstreamError};
use crate::service::ProjectService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProjectService>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(service: ProjectService) -> Self {
        Self {
            service: Arc::new(service),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/:owner/:name", get(project_detail))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until the listener fails
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_projects(State(state): State<AppState>) -> Response {
    match state.service.search().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn project_detail(
    State(state): State<AppState>,
    Path((owner, name)): Path<(String, String)>,
) -> Response {
    let id = format!("{}/{}", owner, name);
    match state.service.fetch_detail(&id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: TrendingError) -> Response {
    let status = status_for(&e);
    if status.is_server_error() {
        error!(error = %e, "Request failed");
    }
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

/// HTTP status the API answers with for a failed operation.
pub fn status_for(e: &TrendingError) -> StatusCode {
    match e {
        TrendingError::InvalidRepoId(_) => StatusCode::BAD_REQUEST,
        TrendingError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        // Only a missing primary record means the requested repository is unknown
        TrendingError::DetailPrimaryFailed {
            source: UpstreamError::NotFound(_),
            ..
        } => StatusCode::NOT_FOUND,
        _ if e.upstream().is_some() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
