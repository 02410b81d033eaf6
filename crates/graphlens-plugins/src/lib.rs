//! GraphLens Plugins: data sources produce graphs, visualizers render them.
//!
//! Plugins are registered explicitly with a [`PluginRegistry`] at startup,
//! keyed by their identifier. [`default_registry`] wires the built-ins.

pub mod json_source;
pub mod params;
pub mod plugin;
pub mod registry;
pub mod visualizers;

pub use json_source::JsonDataSource;
pub use params::{coerce_params, DataSourceParameter, LoadParams, ParamType};
pub use plugin::{DataSource, Plugin, Visualizer};
pub use registry::PluginRegistry;
pub use visualizers::{JsonVisualizer, TextVisualizer};

use std::sync::Arc;

/// Registry holding every built-in plugin, with the text visualizer selected.
pub fn default_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register_data_source(Arc::new(JsonDataSource::new()));
    registry.register_visualizer(Arc::new(TextVisualizer));
    registry.register_visualizer(Arc::new(JsonVisualizer));
    registry
}
