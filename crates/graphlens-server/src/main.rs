//! GraphLens: graph workspace server.

use std::sync::Arc;

use graphlens_core::GraphLensConfig;
use graphlens_plugins::{default_registry, JsonDataSource};
use graphlens_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GraphLensConfig::from_env()?;
    let port = config.port;

    let plugins = default_registry();
    if let Err(e) = plugins.set_current_visualizer(&config.visualizer) {
        warn!("Keeping default visualizer: {}", e);
    }

    let data_file = config.data_file.clone();
    let state = Arc::new(AppState::new(config, plugins));

    if let Some(path) = data_file {
        let graph = JsonDataSource::load_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;
        state.workspaces.write().current_mut().set_graph(Some(graph));
    }

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("GraphLens server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
