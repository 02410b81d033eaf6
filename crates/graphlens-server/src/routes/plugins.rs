//! Plugin routes: data sources and visualizers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use graphlens_core::Error;
use graphlens_plugins::{coerce_params, DataSourceParameter};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/datasources", get(list_data_sources))
        .route("/datasources/{id}/params", get(data_source_params))
        .route("/datasources/{id}/load", post(load_data_source))
        .route("/visualizers", get(list_visualizers))
        .route("/visualizers/{id}/select", post(select_visualizer))
        .route("/visualize", get(visualize))
}

#[derive(Deserialize)]
struct LoadRequest {
    #[serde(default)]
    params: HashMap<String, String>,
}

async fn list_data_sources(State(state): State<Arc<AppState>>) -> Json<Value> {
    let sources: Vec<Value> = state
        .plugins
        .data_sources()
        .iter()
        .map(|s| json!({ "identifier": s.identifier(), "name": s.name() }))
        .collect();
    Json(Value::Array(sources))
}

async fn data_source_params(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<DataSourceParameter>>> {
    let source = state.plugins.data_source(&id)?;
    Ok(Json(source.parameters()))
}

/// Load a graph into the current workspace, replacing its base graph.
async fn load_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<LoadRequest>,
) -> ApiResult<Json<Value>> {
    let source = state.plugins.data_source(&id)?;
    let params = coerce_params(&source.parameters(), &req.params)?;

    // Loading may touch the filesystem; keep it off the async workers.
    let graph = tokio::task::spawn_blocking(move || source.load(&params))
        .await
        .map_err(|e| Error::Internal(format!("load task failed: {e}")))??;

    let (nodes, edges) = (graph.nodes.len(), graph.edges.len());
    let mut service = state.workspaces.write();
    service.current_mut().set_graph(Some(graph));
    info!("Data source {} loaded {} nodes, {} edges", id, nodes, edges);
    Ok(Json(json!({
        "workspace": service.current().id(),
        "nodeCount": nodes,
        "edgeCount": edges,
    })))
}

async fn list_visualizers(State(state): State<Arc<AppState>>) -> Json<Value> {
    let visualizers: Vec<Value> = state
        .plugins
        .visualizers()
        .iter()
        .map(|v| json!({ "identifier": v.identifier(), "name": v.name() }))
        .collect();
    let current = state
        .plugins
        .current_visualizer()
        .map(|v| v.identifier().to_string());
    Json(json!({ "current": current, "visualizers": visualizers }))
}

async fn select_visualizer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.plugins.set_current_visualizer(&id)?;
    Ok(Json(json!({ "current": id })))
}

/// Render the current workspace's derived graph with the current visualizer.
async fn visualize(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let visualizer = state
        .plugins
        .current_visualizer()
        .ok_or_else(|| Error::NotFound("visualizer".to_string()))?;
    let graph = state.workspaces.read().current().graph()?;
    let output = match graph {
        Some(graph) => Some(visualizer.visualize(&graph)?),
        None => None,
    };
    Ok(Json(json!({
        "visualizer": visualizer.identifier(),
        "output": output,
    })))
}
