//! Plugin contracts.

use graphlens_core::Result;
use graphlens_model::Graph;

use crate::params::{DataSourceParameter, LoadParams};

/// Anything that can be registered by identifier.
pub trait Plugin: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Stable key used for registration and lookup.
    fn identifier(&self) -> &str;
}

/// Producer of graphs from some origin (file, API, ...).
pub trait DataSource: Plugin {
    /// Load-time configuration this source requires.
    fn parameters(&self) -> Vec<DataSourceParameter>;

    /// Build a graph. The result must only contain edges between its own nodes.
    fn load(&self, params: &LoadParams) -> Result<Graph>;
}

/// Consumer that renders a graph into a display form.
pub trait Visualizer: Plugin {
    fn visualize(&self, graph: &Graph) -> Result<String>;
}
