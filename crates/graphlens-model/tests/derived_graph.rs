//! Properties of the derived graph and the mutation API.

use std::collections::HashSet;

use graphlens_model::{
    AttrValue, Attributes, Edge, FilterOperator, Graph, IdAllocator, Node, Workspace,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn node(id: &str, age: i64, team: &str) -> Node {
    let mut data = Attributes::new();
    data.insert("age".into(), AttrValue::Int(age));
    data.insert("team".into(), AttrValue::from(team));
    Node::new(id, data).unwrap()
}

const TEAMS: [&str; 3] = ["red", "green", "blue"];

fn arb_graph() -> impl Strategy<Value = Graph> {
    prop::collection::vec((0i64..100, 0usize..3), 1..12).prop_flat_map(|specs| {
        let n = specs.len();
        let nodes: Vec<Node> = specs
            .iter()
            .enumerate()
            .map(|(i, (age, team))| node(&format!("n{i}"), *age, TEAMS[*team]))
            .collect();
        prop::collection::vec((0..n, 0..n), 0..30).prop_map(move |pairs| {
            let mut edges: Vec<Edge> = Vec::new();
            for (s, d) in pairs {
                let edge = Edge::new(format!("n{s}"), format!("n{d}"));
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
            Graph::new(nodes.clone(), edges, true)
        })
    })
}

fn arb_filter() -> impl Strategy<Value = (FilterOperator, i64)> {
    (prop::sample::select(FilterOperator::ALL.to_vec()), 0i64..100)
}

proptest! {
    #[test]
    fn survivors_obey_and_or_law(
        graph in arb_graph(),
        filters in prop::collection::vec(arb_filter(), 0..3),
        searches in prop::collection::vec(prop::sample::select(TEAMS.to_vec()), 0..3),
    ) {
        let mut ws = Workspace::new(1, "prop", IdAllocator::new()).with_graph(graph.clone());
        for (op, threshold) in &filters {
            ws.add_filter("age", *op, threshold.to_string());
        }
        for query in &searches {
            ws.add_search(*query);
        }

        let derived = ws.graph().unwrap().unwrap();
        let survivors: HashSet<&str> = derived.nodes.iter().map(|n| n.id()).collect();

        for n in &graph.nodes {
            let all_filters = ws.filters().iter().all(|f| f.matches(n).unwrap());
            let any_search = ws.searches().is_empty() || ws.searches().iter().any(|s| s.matches(n));
            prop_assert_eq!(survivors.contains(n.id()), all_filters && any_search);
        }

        for e in &derived.edges {
            prop_assert!(survivors.contains(e.src.as_str()));
            prop_assert!(survivors.contains(e.dest.as_str()));
        }
        let expected_edges = graph
            .edges
            .iter()
            .filter(|e| survivors.contains(e.src.as_str()) && survivors.contains(e.dest.as_str()))
            .count();
        prop_assert_eq!(derived.edges.len(), expected_edges);
        prop_assert_eq!(ws.base_graph().unwrap(), &graph);
    }

    #[test]
    fn delete_node_leaves_no_dangling_edges(graph in arb_graph(), pick in 0usize..12) {
        let victim = graph.nodes[pick % graph.nodes.len()].id().to_string();
        let mut ws = Workspace::new(1, "prop", IdAllocator::new()).with_graph(graph);

        prop_assert!(ws.delete_node(&victim));
        let base = ws.base_graph().unwrap();
        prop_assert!(base.edges.iter().all(|e| !e.touches(&victim)));
        prop_assert!(base.dangling_edges().is_empty());
    }

    #[test]
    fn round_trip_preserves_graph(graph in arb_graph()) {
        let restored = Graph::from_value(graph.to_value().unwrap()).unwrap();
        prop_assert_eq!(restored, graph);
    }
}

#[test]
fn duplicate_edge_leaves_count_unchanged() {
    let mut ws = Workspace::new(1, "w", IdAllocator::new());
    assert!(ws.add_node(node("A", 1, "red")));
    assert!(ws.add_node(node("B", 2, "red")));
    assert!(ws.add_edge("A", "B"));
    assert!(!ws.add_edge("A", "B"));
    assert_eq!(ws.base_graph().unwrap().edges.len(), 1);
}

#[test]
fn status_filter_on_node_without_status() {
    let mut ws = Workspace::new(1, "w", IdAllocator::new())
        .with_graph(Graph::new(vec![node("A", 1, "red")], Vec::new(), false));
    ws.add_filter("status", FilterOperator::Equal, "Active");
    assert!(ws.graph().unwrap().unwrap().nodes.is_empty());
}

#[test]
fn edits_are_visible_in_next_derivation() {
    let mut ws = Workspace::new(1, "w", IdAllocator::new()).with_graph(Graph::new(
        vec![node("A", 10, "red"), node("B", 20, "blue")],
        vec![Edge::new("A", "B")],
        true,
    ));
    ws.add_filter("age", FilterOperator::GreaterThan, "15");
    assert_eq!(ws.graph().unwrap().unwrap().nodes.len(), 1);

    let mut older = Attributes::new();
    older.insert("age".into(), AttrValue::Int(16));
    assert!(ws.edit_node("A", older));

    let derived = ws.graph().unwrap().unwrap();
    assert_eq!(derived.nodes.len(), 2);
    assert_eq!(derived.edges, vec![Edge::new("A", "B")]);
}
