//! Built-in visualizers.

use graphlens_core::Result;
use graphlens_model::Graph;

use crate::plugin::{Plugin, Visualizer};

/// Plain-text listing of nodes with their attributes, then edges.
#[derive(Debug, Default)]
pub struct TextVisualizer;

impl Plugin for TextVisualizer {
    fn name(&self) -> &str {
        "Text"
    }

    fn identifier(&self) -> &str {
        "text"
    }
}

impl Visualizer for TextVisualizer {
    fn visualize(&self, graph: &Graph) -> Result<String> {
        let kind = if graph.directed { "directed" } else { "undirected" };
        Ok(format!(
            "{kind} graph, {} nodes, {} edges\n{graph}",
            graph.nodes.len(),
            graph.edges.len()
        ))
    }
}

/// The graph's JSON wire form, for client-side renderers.
#[derive(Debug, Default)]
pub struct JsonVisualizer;

impl Plugin for JsonVisualizer {
    fn name(&self) -> &str {
        "JSON"
    }

    fn identifier(&self) -> &str {
        "json"
    }
}

impl Visualizer for JsonVisualizer {
    fn visualize(&self, graph: &Graph) -> Result<String> {
        graph.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlens_model::{Attributes, Edge, Node};

    fn sample() -> Graph {
        Graph::new(
            vec![
                Node::new("a", Attributes::new()).unwrap(),
                Node::new("b", Attributes::new()).unwrap(),
            ],
            vec![Edge::new("a", "b")],
            false,
        )
    }

    #[test]
    fn test_text_output() {
        let out = TextVisualizer.visualize(&sample()).unwrap();
        assert!(out.starts_with("undirected graph, 2 nodes, 1 edges\n"));
        assert!(out.ends_with("Edges:\na -> b"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let out = JsonVisualizer.visualize(&sample()).unwrap();
        assert_eq!(Graph::from_json(&out).unwrap(), sample());
    }
}
