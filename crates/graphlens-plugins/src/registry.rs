//! Explicit registry of data sources and visualizers.

use std::sync::Arc;

use graphlens_core::{Error, Result};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::plugin::{DataSource, Visualizer};

/// Plugins keyed by identifier, in registration order.
#[derive(Default)]
pub struct PluginRegistry {
    data_sources: Vec<Arc<dyn DataSource>>,
    visualizers: Vec<Arc<dyn Visualizer>>,
    current_visualizer: RwLock<Option<String>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data source, replacing any with the same identifier.
    pub fn register_data_source(&mut self, source: Arc<dyn DataSource>) {
        if let Some(slot) = self
            .data_sources
            .iter_mut()
            .find(|s| s.identifier() == source.identifier())
        {
            warn!("Data source {} registered twice; replacing", source.identifier());
            *slot = source;
            return;
        }
        info!("Data source registered: {}", source.identifier());
        self.data_sources.push(source);
    }

    /// Register a visualizer, replacing any with the same identifier.
    ///
    /// The first visualizer registered becomes the current one.
    pub fn register_visualizer(&mut self, visualizer: Arc<dyn Visualizer>) {
        if let Some(slot) = self
            .visualizers
            .iter_mut()
            .find(|v| v.identifier() == visualizer.identifier())
        {
            warn!("Visualizer {} registered twice; replacing", visualizer.identifier());
            *slot = visualizer;
            return;
        }
        info!("Visualizer registered: {}", visualizer.identifier());
        let mut current = self.current_visualizer.write();
        if current.is_none() {
            *current = Some(visualizer.identifier().to_string());
        }
        drop(current);
        self.visualizers.push(visualizer);
    }

    pub fn data_sources(&self) -> &[Arc<dyn DataSource>] {
        &self.data_sources
    }

    pub fn visualizers(&self) -> &[Arc<dyn Visualizer>] {
        &self.visualizers
    }

    pub fn data_source(&self, identifier: &str) -> Result<Arc<dyn DataSource>> {
        self.data_sources
            .iter()
            .find(|s| s.identifier() == identifier)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("data source {identifier}")))
    }

    pub fn visualizer(&self, identifier: &str) -> Result<Arc<dyn Visualizer>> {
        self.visualizers
            .iter()
            .find(|v| v.identifier() == identifier)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("visualizer {identifier}")))
    }

    pub fn current_visualizer(&self) -> Option<Arc<dyn Visualizer>> {
        let current = self.current_visualizer.read();
        current.as_deref().and_then(|id| self.visualizer(id).ok())
    }

    /// Select the current visualizer; it must already be registered.
    pub fn set_current_visualizer(&self, identifier: &str) -> Result<()> {
        let visualizer = self.visualizer(identifier)?;
        *self.current_visualizer.write() = Some(visualizer.identifier().to_string());
        info!("Current visualizer: {}", identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_registry, JsonVisualizer, TextVisualizer};

    #[test]
    fn test_default_registry_contents() {
        let registry = default_registry();
        assert_eq!(registry.data_sources().len(), 1);
        assert!(registry.data_source("JsonDataSource").is_ok());
        assert!(matches!(registry.data_source("rdf"), Err(Error::NotFound(_))));
        assert_eq!(registry.visualizers().len(), 2);
        assert_eq!(registry.current_visualizer().unwrap().identifier(), "text");
    }

    #[test]
    fn test_select_visualizer() {
        let registry = default_registry();
        registry.set_current_visualizer("json").unwrap();
        assert_eq!(registry.current_visualizer().unwrap().identifier(), "json");
        assert!(registry.set_current_visualizer("block").is_err());
        assert_eq!(registry.current_visualizer().unwrap().identifier(), "json");
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let mut registry = PluginRegistry::new();
        assert!(registry.current_visualizer().is_none());
        registry.register_visualizer(Arc::new(JsonVisualizer));
        registry.register_visualizer(Arc::new(TextVisualizer));
        registry.register_visualizer(Arc::new(JsonVisualizer));
        assert_eq!(registry.visualizers().len(), 2);
        assert_eq!(registry.current_visualizer().unwrap().identifier(), "json");
    }
}
