//! Shared application state.

use graphlens_core::GraphLensConfig;
use graphlens_model::WorkspaceService;
use graphlens_plugins::PluginRegistry;
use parking_lot::RwLock;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: GraphLensConfig,
    pub workspaces: RwLock<WorkspaceService>,
    pub plugins: PluginRegistry,
}

impl AppState {
    pub fn new(config: GraphLensConfig, plugins: PluginRegistry) -> Self {
        let workspaces = WorkspaceService::new(config.date_format);
        Self {
            config,
            workspaces: RwLock::new(workspaces),
            plugins,
        }
    }
}
