//! HTTP route handlers.

pub mod cli;
pub mod graph;
pub mod plugins;
pub mod workspaces;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(workspaces::routes())
        .merge(graph::routes())
        .merge(plugins::routes())
        .merge(cli::routes())
}

/// Error body `{"error": "..."}` with a status derived from the error kind.
pub struct ApiError(graphlens_core::Error);

impl From<graphlens_core::Error> for ApiError {
    fn from(e: graphlens_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            graphlens_core::Error::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_usage() => StatusCode::BAD_REQUEST,
            e => {
                error!("Request failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
