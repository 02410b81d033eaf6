//! Workspace: a base graph plus the filters and searches applied to it.

use std::collections::HashSet;

use graphlens_core::{DateFormat, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::edge::Edge;
use crate::filter::{Filter, FilterOperator};
use crate::graph::Graph;
use crate::ids::IdAllocator;
use crate::node::Node;
use crate::search::Search;
use crate::value::{AttrValue, Attributes};

/// Outcome tier of an interpreted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Success,
    Warning,
    Error,
}

/// One interpreted command and its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliEntry {
    pub command: String,
    pub response: String,
    pub status: CommandStatus,
}

/// Lightweight description of a workspace for listings.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceSummary {
    pub id: u64,
    pub name: String,
    #[serde(rename = "hasGraph")]
    pub has_graph: bool,
    #[serde(rename = "nodeCount")]
    pub node_count: usize,
    #[serde(rename = "edgeCount")]
    pub edge_count: usize,
    pub filters: Vec<Filter>,
    pub searches: Vec<Search>,
}

/// A named view over one graph.
///
/// Mutations act on the base graph. Reads through [`Workspace::graph`]
/// derive a fresh subgraph from the current filters and searches each time.
#[derive(Debug, Clone)]
pub struct Workspace {
    id: u64,
    name: String,
    graph: Option<Graph>,
    filters: Vec<Filter>,
    searches: Vec<Search>,
    cli_history: Vec<CliEntry>,
    ids: IdAllocator,
    date_format: DateFormat,
}

impl Workspace {
    pub fn new(id: u64, name: impl Into<String>, ids: IdAllocator) -> Self {
        Self {
            id,
            name: name.into(),
            graph: None,
            filters: Vec::new(),
            searches: Vec::new(),
            cli_history: Vec::new(),
            ids,
            date_format: DateFormat::default(),
        }
    }

    pub fn with_graph(mut self, graph: Graph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn searches(&self) -> &[Search] {
        &self.searches
    }

    pub fn cli_history(&self) -> &[CliEntry] {
        &self.cli_history
    }

    pub fn record_command(&mut self, entry: CliEntry) {
        self.cli_history.push(entry);
    }

    // ---------------------------------------------------------------
    // Base and derived graph
    // ---------------------------------------------------------------

    /// The stored, unfiltered graph.
    pub fn base_graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// Replace the base graph wholesale, e.g. after a data load.
    pub fn set_graph(&mut self, graph: Option<Graph>) {
        if let Some(g) = &graph {
            info!(
                workspace = self.id,
                nodes = g.nodes.len(),
                edges = g.edges.len(),
                "base graph replaced"
            );
        }
        self.graph = graph;
    }

    /// The visible subgraph.
    ///
    /// Nodes survive when every filter matches and, if any searches exist, at
    /// least one search matches. Edges survive when both endpoints survive.
    /// Filter coercion errors propagate. `None` when no base graph is set.
    pub fn graph(&self) -> Result<Option<Graph>> {
        let Some(base) = &self.graph else {
            return Ok(None);
        };

        let mut nodes = Vec::with_capacity(base.nodes.len());
        for node in &base.nodes {
            if self.is_visible(node)? {
                nodes.push(node.clone());
            }
        }

        let retained: HashSet<&str> = nodes.iter().map(|n| n.id()).collect();
        let edges: Vec<Edge> = base
            .edges
            .iter()
            .filter(|e| retained.contains(e.src.as_str()) && retained.contains(e.dest.as_str()))
            .cloned()
            .collect();

        debug!(
            workspace = self.id,
            nodes = nodes.len(),
            edges = edges.len(),
            "derived graph computed"
        );
        Ok(Some(Graph::new(nodes, edges, base.directed)))
    }

    fn is_visible(&self, node: &Node) -> Result<bool> {
        for filter in &self.filters {
            if !filter.matches(node)? {
                return Ok(false);
            }
        }
        Ok(self.searches.is_empty() || self.searches.iter().any(|s| s.matches(node)))
    }

    // ---------------------------------------------------------------
    // Filters and searches
    // ---------------------------------------------------------------

    /// Append a filter and return its id.
    pub fn add_filter(
        &mut self,
        attribute: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<AttrValue>,
    ) -> u64 {
        let filter = Filter::new(self.ids.next_id(), attribute, operator, value)
            .with_date_format(self.date_format);
        let id = filter.id();
        info!(workspace = self.id, filter = id, "filter added: {}", filter);
        self.filters.push(filter);
        id
    }

    /// Remove a filter by id. Unknown ids are ignored.
    pub fn remove_filter(&mut self, id: u64) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id() != id);
        before != self.filters.len()
    }

    /// Append a search and return its id.
    pub fn add_search(&mut self, query: impl Into<String>) -> u64 {
        let search = Search::new(self.ids.next_id(), query);
        let id = search.id();
        info!(workspace = self.id, search = id, query = search.query(), "search added");
        self.searches.push(search);
        id
    }

    /// Remove a search by id. Unknown ids are ignored.
    pub fn remove_search(&mut self, id: u64) -> bool {
        let before = self.searches.len();
        self.searches.retain(|s| s.id() != id);
        before != self.searches.len()
    }

    // ---------------------------------------------------------------
    // Structural mutation of the base graph
    // ---------------------------------------------------------------

    fn base_mut(&mut self) -> &mut Graph {
        self.graph.get_or_insert_with(|| Graph::empty(true))
    }

    /// Append `node` unless its id is taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        let graph = self.base_mut();
        if graph.contains_node(node.id()) {
            return false;
        }
        graph.nodes.push(node);
        true
    }

    /// Merge `attributes` into the node with `id`.
    pub fn edit_node(&mut self, id: &str, attributes: Attributes) -> bool {
        match self.graph.as_mut().and_then(|g| g.node_mut(id)) {
            Some(node) => {
                node.merge(attributes);
                true
            }
            None => false,
        }
    }

    /// Remove the node with `id` and every edge touching it.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        let before = graph.nodes.len();
        graph.nodes.retain(|n| n.id() != id);
        if graph.nodes.len() == before {
            return false;
        }
        graph.edges.retain(|e| !e.touches(id));
        true
    }

    /// Append `src -> dest` when both nodes exist and the pair is new.
    pub fn add_edge(&mut self, src: &str, dest: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        if !graph.contains_node(src) || !graph.contains_node(dest) || graph.contains_edge(src, dest) {
            return false;
        }
        graph.edges.push(Edge::new(src, dest));
        true
    }

    /// Repoint the edge `old_src -> old_dest` to `new_src -> new_dest`.
    ///
    /// Fails when the old edge is missing, a new endpoint is missing, or the
    /// new pair already exists as a different edge.
    pub fn edit_edge(&mut self, old_src: &str, old_dest: &str, new_src: &str, new_dest: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        if !graph.contains_node(new_src) || !graph.contains_node(new_dest) {
            return false;
        }
        let unchanged = old_src == new_src && old_dest == new_dest;
        if !unchanged && graph.contains_edge(new_src, new_dest) {
            return false;
        }
        match graph.edges.iter_mut().find(|e| e.connects(old_src, old_dest)) {
            Some(edge) => {
                edge.src = new_src.to_string();
                edge.dest = new_dest.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove every `src -> dest` edge.
    pub fn delete_edge(&mut self, src: &str, dest: &str) -> bool {
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        let before = graph.edges.len();
        graph.edges.retain(|e| !e.connects(src, dest));
        graph.edges.len() != before
    }

    /// Empty the base graph's nodes and edges.
    pub fn clean_start(&mut self) {
        let graph = self.base_mut();
        graph.nodes.clear();
        graph.edges.clear();
        info!(workspace = self.id, "workspace cleared");
    }

    pub fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            id: self.id,
            name: self.name.clone(),
            has_graph: self.graph.is_some(),
            node_count: self.graph.as_ref().map_or(0, |g| g.nodes.len()),
            edge_count: self.graph.as_ref().map_or(0, |g| g.edges.len()),
            filters: self.filters.clone(),
            searches: self.searches.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, data: &[(&str, AttrValue)]) -> Node {
        Node::new(
            id,
            data.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        )
        .unwrap()
    }

    fn ages() -> Workspace {
        let graph = Graph::new(
            vec![
                node("A", &[("age", 30.into())]),
                node("B", &[("age", 17.into())]),
                node("C", &[("age", 45.into())]),
            ],
            vec![Edge::new("A", "B"), Edge::new("A", "C")],
            true,
        );
        Workspace::new(1, "people", IdAllocator::new()).with_graph(graph)
    }

    fn ids(graph: &Graph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.id()).collect()
    }

    #[test]
    fn test_absent_graph_derives_none() {
        let ws = Workspace::new(1, "empty", IdAllocator::new());
        assert!(ws.graph().unwrap().is_none());
        assert!(ws.base_graph().is_none());
    }

    #[test]
    fn test_filter_drops_nodes_and_their_edges() {
        let mut ws = ages();
        ws.add_filter("age", FilterOperator::GreaterThanOrEqual, "18");

        let derived = ws.graph().unwrap().unwrap();
        assert_eq!(ids(&derived), vec!["A", "C"]);
        assert_eq!(derived.edges, vec![Edge::new("A", "C")]);
        assert!(derived.directed);
        assert_eq!(ws.base_graph().unwrap().nodes.len(), 3);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut ws = ages();
        ws.add_search("45");
        assert_eq!(ws.graph().unwrap(), ws.graph().unwrap());
    }

    #[test]
    fn test_searches_are_or_combined() {
        let mut ws = ages();
        ws.add_search("30");
        ws.add_search("17");
        assert_eq!(ids(&ws.graph().unwrap().unwrap()), vec!["A", "B"]);
    }

    #[test]
    fn test_filters_are_and_combined_with_searches() {
        let mut ws = ages();
        ws.add_filter("age", FilterOperator::GreaterThan, "20");
        ws.add_filter("age", FilterOperator::LessThan, "40");
        ws.add_search("17");
        assert!(ws.graph().unwrap().unwrap().nodes.is_empty());

        ws.add_search("30");
        assert_eq!(ids(&ws.graph().unwrap().unwrap()), vec!["A"]);
    }

    #[test]
    fn test_filter_errors_propagate() {
        let mut ws = ages();
        ws.add_filter("age", FilterOperator::Equal, "old");
        assert!(ws.graph().is_err());
    }

    #[test]
    fn test_remove_filter_and_search() {
        let mut ws = ages();
        let f = ws.add_filter("age", FilterOperator::LessThan, "18");
        let s = ws.add_search("nobody");
        assert_ne!(f, s);

        assert!(ws.remove_filter(f));
        assert!(!ws.remove_filter(f));
        assert!(!ws.remove_search(999));
        assert!(ws.remove_search(s));
        assert_eq!(ws.graph().unwrap().unwrap().nodes.len(), 3);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut ws = Workspace::new(1, "w", IdAllocator::new());
        assert!(ws.add_node(node("X", &[])));
        assert!(!ws.add_node(node("X", &[])));
        assert_eq!(ws.base_graph().unwrap().nodes.len(), 1);
    }

    #[test]
    fn test_edit_node_merges() {
        let mut ws = ages();
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), "Ann".into());
        assert!(ws.edit_node("A", attrs.clone()));
        assert!(!ws.edit_node("Z", attrs));

        let a = ws.base_graph().unwrap().node("A").unwrap();
        assert_eq!(a.get("age"), Some(&AttrValue::Int(30)));
        assert_eq!(a.get("name"), Some(&AttrValue::from("Ann")));
    }

    #[test]
    fn test_delete_node_cascades() {
        let mut ws = Workspace::new(1, "w", IdAllocator::new()).with_graph(Graph::new(
            vec![node("A", &[]), node("B", &[]), node("C", &[])],
            vec![Edge::new("A", "B"), Edge::new("B", "A"), Edge::new("B", "C")],
            true,
        ));
        assert!(ws.delete_node("A"));
        assert!(!ws.delete_node("A"));
        assert_eq!(ws.base_graph().unwrap().edges, vec![Edge::new("B", "C")]);
    }

    #[test]
    fn test_add_edge_rules() {
        let mut ws = ages();
        assert!(!ws.add_edge("A", "B"));
        assert!(ws.add_edge("B", "A"));
        assert!(!ws.add_edge("A", "Z"));
        assert!(!ws.add_edge("Z", "A"));
        assert_eq!(ws.base_graph().unwrap().edges.len(), 3);
    }

    #[test]
    fn test_edit_edge_rules() {
        let mut ws = ages();
        assert!(!ws.edit_edge("B", "C", "C", "B"));
        assert!(!ws.edit_edge("A", "B", "A", "Z"));
        assert!(!ws.edit_edge("A", "B", "A", "C"));
        assert!(ws.edit_edge("A", "B", "A", "B"));
        assert!(ws.edit_edge("A", "B", "C", "B"));
        assert_eq!(
            ws.base_graph().unwrap().edges,
            vec![Edge::new("C", "B"), Edge::new("A", "C")]
        );
    }

    #[test]
    fn test_delete_edge() {
        let mut ws = ages();
        assert!(ws.delete_edge("A", "B"));
        assert!(!ws.delete_edge("A", "B"));
        assert!(!ws.delete_edge("C", "A"));
        assert_eq!(ws.base_graph().unwrap().edges, vec![Edge::new("A", "C")]);
    }

    #[test]
    fn test_mutations_without_graph() {
        let mut ws = Workspace::new(1, "w", IdAllocator::new());
        assert!(!ws.edit_node("A", Attributes::new()));
        assert!(!ws.delete_node("A"));
        assert!(!ws.add_edge("A", "B"));
        assert!(!ws.delete_edge("A", "B"));

        ws.clean_start();
        let base = ws.base_graph().unwrap();
        assert!(base.nodes.is_empty() && base.edges.is_empty());
    }

    #[test]
    fn test_clean_start_empties_graph() {
        let mut ws = ages();
        ws.clean_start();
        let base = ws.base_graph().unwrap();
        assert!(base.nodes.is_empty());
        assert!(base.edges.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut ws = ages();
        ws.add_search("30");
        let summary = ws.summary();
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.edge_count, 2);
        assert_eq!(summary.searches.len(), 1);
        assert!(summary.has_graph);
    }
}
