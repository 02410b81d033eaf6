//! Graph edge: an ordered pair of node references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// An edge between two nodes of the same graph.
///
/// Endpoints are held by node id; the graph owns the nodes themselves, so
/// several edges can point at one node and attribute edits are visible
/// through every edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub src: String,
    pub dest: String,
}

impl Edge {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }

    /// Edge from `src` to `dest`.
    pub fn connecting(src: &Node, dest: &Node) -> Self {
        Self::new(src.id(), dest.id())
    }

    /// Whether this edge is exactly `src -> dest`.
    pub fn connects(&self, src: &str, dest: &str) -> bool {
        self.src == src && self.dest == dest
    }

    /// Whether either endpoint is `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.src == id || self.dest == id
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dest)
    }
}
