//! Graph aggregate and its JSON round-trip.

use std::collections::HashSet;
use std::fmt;

use graphlens_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::Node;

/// Nodes, edges and a directedness flag.
///
/// Every edge is expected to reference nodes present in `nodes`. The
/// workspace mutation API keeps that true; graphs produced by data sources
/// are trusted to satisfy it, and deserialization checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphRecord")]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub directed: bool,
}

#[derive(Deserialize)]
struct GraphRecord {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    directed: bool,
}

impl TryFrom<GraphRecord> for Graph {
    type Error = Error;

    fn try_from(record: GraphRecord) -> Result<Self> {
        let graph = Graph::new(record.nodes, record.edges, record.directed);
        if let Some(edge) = graph.dangling_edges().first() {
            let missing = if graph.contains_node(&edge.src) {
                &edge.dest
            } else {
                &edge.src
            };
            return Err(Error::UnknownNode(missing.clone()));
        }
        Ok(graph)
    }
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, directed: bool) -> Self {
        Self {
            nodes,
            edges,
            directed,
        }
    }

    pub fn empty(directed: bool) -> Self {
        Self::new(Vec::new(), Vec::new(), directed)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, src: &str, dest: &str) -> bool {
        self.edges.iter().any(|e| e.connects(src, dest))
    }

    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id()).collect()
    }

    /// Edges with an endpoint missing from `nodes`.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids = self.node_ids();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.src.as_str()) || !ids.contains(e.dest.as_str()))
            .collect()
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for node in &self.nodes {
            writeln!(f, "{node}")?;
        }
        write!(f, "Edges:")?;
        for edge in &self.edges {
            write!(f, "\n{edge}")?;
        }
        Ok(())
    }
}
