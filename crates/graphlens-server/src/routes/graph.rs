//! Graph routes: derived and base graph, filters, searches.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use graphlens_core::Error;
use graphlens_model::{AttrValue, Filter, FilterOperator, Search};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::ApiResult;
use crate::state::AppState;

// ---------------------------------------------------------------
// Route builder
// ---------------------------------------------------------------

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/graph", get(derived_graph))
        .route("/graph/base", get(base_graph))
        .route("/filters", get(list_filters).post(add_filter))
        .route("/filters/operators", get(list_operators))
        .route("/filters/{id}", delete(remove_filter))
        .route("/searches", get(list_searches).post(add_search))
        .route("/searches/{id}", delete(remove_search))
}

// ---------------------------------------------------------------
// Request types
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct FilterRequest {
    attribute: String,
    operator: String,
    value: Value,
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
}

// ---------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------

async fn derived_graph(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let service = state.workspaces.read();
    let graph = service.current().graph()?;
    Ok(Json(json!({ "graph": graph })))
}

async fn base_graph(State(state): State<Arc<AppState>>) -> Json<Value> {
    let service = state.workspaces.read();
    Json(json!({ "graph": service.current().base_graph() }))
}

async fn list_filters(State(state): State<Arc<AppState>>) -> Json<Vec<Filter>> {
    Json(state.workspaces.read().current().filters().to_vec())
}

/// Adds a filter, rolling it back when the current graph cannot be
/// evaluated against it.
async fn add_filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FilterRequest>,
) -> ApiResult<Json<Value>> {
    let attribute = req.attribute.trim();
    if attribute.is_empty() {
        return Err(Error::InvalidParameter("attribute".to_string()).into());
    }
    let operator: FilterOperator = req.operator.trim().parse()?;
    let value = filter_operand(&req.value)?;

    let mut service = state.workspaces.write();
    let workspace = service.current_mut();
    let id = workspace.add_filter(attribute, operator, value);
    if let Err(e) = workspace.graph() {
        warn!("Rejecting filter {}: {}", id, e);
        workspace.remove_filter(id);
        return Err(e.into());
    }
    Ok(Json(json!({ "id": id })))
}

async fn remove_filter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<Value> {
    let removed = state.workspaces.write().current_mut().remove_filter(id);
    Json(json!({ "removed": removed }))
}

async fn list_operators() -> Json<Value> {
    let operators: Vec<Value> = FilterOperator::choices()
        .into_iter()
        .map(|(name, symbol)| json!({ "name": name, "symbol": symbol }))
        .collect();
    Json(Value::Array(operators))
}

async fn list_searches(State(state): State<Arc<AppState>>) -> Json<Vec<Search>> {
    Json(state.workspaces.read().current().searches().to_vec())
}

async fn add_search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<Json<Value>> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(Error::InvalidParameter("search query".to_string()).into());
    }
    let id = state.workspaces.write().current_mut().add_search(query);
    info!("Search '{}' added", query);
    Ok(Json(json!({ "id": id })))
}

async fn remove_search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<Value> {
    let removed = state.workspaces.write().current_mut().remove_search(id);
    Json(json!({ "removed": removed }))
}

/// Strings are kept verbatim and coerced per attribute at evaluation time.
fn filter_operand(raw: &Value) -> Result<AttrValue, Error> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Ok(AttrValue::Str(s.clone())),
        Value::Number(_) => AttrValue::from_json(raw).map_err(|reason| Error::InvalidAttribute {
            key: "value".to_string(),
            reason,
        }),
        _ => Err(Error::InvalidParameter("filter value".to_string())),
    }
}
