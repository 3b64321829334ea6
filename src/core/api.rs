//! HTTP API for the dashboard
//!
//! Endpoints:
//! - GET /          - Form page
//! - POST /search   - Run one dashboard query
//! - GET /geocode   - Resolve a place name or address (`?query=`)
//! - GET /health    - Health check

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::core::dashboard::{Dashboard, DashboardResult};
use crate::error::PulseError;
use crate::types::{Location, SearchForm};

const INDEX_HTML: &str = include_str!("index.html");

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Geocode request
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub query: String,
}

/// PulseError mapped onto an HTTP response
pub struct ApiError(pub PulseError);

impl From<PulseError> for ApiError {
    fn from(err: PulseError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            code: self.0.code().to_string(),
            message: self.0.user_message(),
            field: self.0.field().map(|f| f.name().to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router
pub fn create_router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/geocode", get(geocode))
        .with_state(dashboard)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn search(
    State(dashboard): State<Arc<Dashboard>>,
    Json(form): Json<SearchForm>,
) -> Result<Json<DashboardResult>, ApiError> {
    let result = dashboard.run(&form).await?;
    Ok(Json(result))
}

async fn geocode(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Location>, ApiError> {
    let location = dashboard.resolve(&params.query).await?;
    Ok(Json(location))
}

/// Run the API server
pub async fn run_server(addr: &str, dashboard: Arc<Dashboard>) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(dashboard);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "PlacePulse dashboard listening");
    axum::serve(listener, router).await?;
    Ok(())
}
