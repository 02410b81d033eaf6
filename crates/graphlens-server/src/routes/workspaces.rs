//! Workspace routes: list, create, select, rename.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use graphlens_model::WorkspaceSummary;
use serde::Deserialize;
use serde_json::{json, Value};

use super::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workspaces", get(list_workspaces).post(create_workspace))
        .route("/workspaces/current", get(current_workspace).put(rename_workspace))
        .route("/workspaces/{id}/select", post(select_workspace))
}

#[derive(Deserialize)]
struct NameRequest {
    name: String,
}

async fn list_workspaces(State(state): State<Arc<AppState>>) -> Json<Value> {
    let service = state.workspaces.read();
    let workspaces: Vec<WorkspaceSummary> =
        service.workspaces().iter().map(|w| w.summary()).collect();
    Json(json!({
        "current": service.current().id(),
        "workspaces": workspaces,
    }))
}

async fn current_workspace(State(state): State<Arc<AppState>>) -> Json<WorkspaceSummary> {
    Json(state.workspaces.read().current().summary())
}

async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NameRequest>,
) -> ApiResult<Json<WorkspaceSummary>> {
    let mut service = state.workspaces.write();
    service.create_workspace(&req.name)?;
    Ok(Json(service.current().summary()))
}

async fn select_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<WorkspaceSummary>> {
    let mut service = state.workspaces.write();
    service.select_workspace(id)?;
    Ok(Json(service.current().summary()))
}

async fn rename_workspace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NameRequest>,
) -> ApiResult<Json<WorkspaceSummary>> {
    let mut service = state.workspaces.write();
    service.rename_current(&req.name)?;
    Ok(Json(service.current().summary()))
}
