//! CLI routes: execute a command line against the current workspace.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use graphlens_commands::{run_command, CommandOutcome};
use graphlens_model::CliEntry;
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cli", post(execute))
        .route("/cli/history", get(history))
}

#[derive(Deserialize)]
struct CommandRequest {
    command: String,
}

async fn execute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommandRequest>,
) -> Json<CommandOutcome> {
    let mut service = state.workspaces.write();
    Json(run_command(service.current_mut(), &req.command))
}

async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<CliEntry>> {
    Json(state.workspaces.read().current().cli_history().to_vec())
}
