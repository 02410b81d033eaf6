//! JSON file data source.
//!
//! Every JSON object in the document becomes a node carrying its scalar
//! members. Nesting becomes parent -> child edges, and strings inside arrays
//! that name a declared `"id"` become reference edges.

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use graphlens_core::{Error, Result};
use graphlens_model::{AttrValue, Attributes, Edge, Graph, Node, Timestamp};
use serde_json::Value;
use tracing::{debug, info};

use crate::params::{DataSourceParameter, LoadParams, ParamType};
use crate::plugin::{DataSource, Plugin};

const FILE_PATH: &str = "file_path";

#[derive(Debug, Default)]
pub struct JsonDataSource;

impl JsonDataSource {
    pub fn new() -> Self {
        Self
    }

    /// Build a graph from an already parsed document.
    pub fn graph_from_value(document: &Value) -> Result<Graph> {
        let mut builder = GraphBuilder::default();
        builder.walk(document, None)?;
        builder.finish()
    }

    pub fn load_file(path: &Path) -> Result<Graph> {
        let text = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&text)?;
        let graph = Self::graph_from_value(&document)?;
        info!(
            "Loaded {} nodes and {} edges from {}",
            graph.nodes.len(),
            graph.edges.len(),
            path.display()
        );
        Ok(graph)
    }
}

impl Plugin for JsonDataSource {
    fn name(&self) -> &str {
        "JsonDataSource"
    }

    fn identifier(&self) -> &str {
        "JsonDataSource"
    }
}

impl DataSource for JsonDataSource {
    fn parameters(&self) -> Vec<DataSourceParameter> {
        vec![DataSourceParameter::new(FILE_PATH, ParamType::Str, "File path")]
    }

    fn load(&self, params: &LoadParams) -> Result<Graph> {
        let path = params
            .get(FILE_PATH)
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::InvalidParameter("File path".to_string()))?;
        Self::load_file(Path::new(path))
    }
}

#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<Node>,
    seen: HashSet<String>,
    declared_ids: HashSet<String>,
    edges: Vec<Edge>,
    edge_set: HashSet<(String, String)>,
    /// `(owner, text)` for strings found inside arrays.
    references: Vec<(String, String)>,
}

impl GraphBuilder {
    /// Visit `item`, returning the node id when `item` is an object.
    fn walk(&mut self, item: &Value, parent: Option<&str>) -> Result<Option<String>> {
        match item {
            Value::Object(members) => {
                let id = self.register(members)?;
                if let Some(parent) = parent {
                    self.link(parent, &id);
                }
                for value in members.values() {
                    match value {
                        Value::Object(_) => {
                            self.walk(value, Some(id.as_str()))?;
                        }
                        Value::Array(elements) => self.walk_array(elements, &id)?,
                        _ => {}
                    }
                }
                Ok(Some(id))
            }
            Value::Array(elements) => {
                for element in elements {
                    self.walk(element, parent)?;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn walk_array(&mut self, elements: &[Value], owner: &str) -> Result<()> {
        for element in elements {
            match element {
                Value::String(text) => self.references.push((owner.to_string(), text.clone())),
                Value::Array(nested) => self.walk_array(nested, owner)?,
                other => {
                    self.walk(other, Some(owner))?;
                }
            }
        }
        Ok(())
    }

    fn register(&mut self, members: &serde_json::Map<String, Value>) -> Result<String> {
        let declared = members.get("id").and_then(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let id = match declared {
            Some(id) => {
                self.declared_ids.insert(id.clone());
                id
            }
            None => uuid::Uuid::new_v4().to_string(),
        };

        if self.seen.insert(id.clone()) {
            let data: Attributes = members
                .iter()
                .filter_map(|(key, value)| convert_scalar(value).map(|v| (key.clone(), v)))
                .collect();
            self.nodes.push(Node::new(id.clone(), data)?);
        }
        Ok(id)
    }

    fn link(&mut self, src: &str, dest: &str) {
        if self.edge_set.insert((src.to_string(), dest.to_string())) {
            self.edges.push(Edge::new(src, dest));
        }
    }

    fn finish(mut self) -> Result<Graph> {
        let references = std::mem::take(&mut self.references);
        for (owner, text) in references {
            if self.declared_ids.contains(&text) {
                self.link(&owner, &text);
            }
        }
        debug!(nodes = self.nodes.len(), edges = self.edges.len(), "JSON document walked");
        Ok(Graph::new(self.nodes, self.edges, true))
    }
}

/// Scalar JSON members become attributes; containers and nulls are skipped.
fn convert_scalar(value: &Value) -> Option<AttrValue> {
    match value {
        Value::String(s) => Some(
            parse_date(s)
                .map(AttrValue::Timestamp)
                .unwrap_or_else(|| AttrValue::Str(s.clone())),
        ),
        Value::Number(n) => n
            .as_i64()
            .map(AttrValue::Int)
            .or_else(|| n.as_f64().map(AttrValue::Float)),
        Value::Bool(b) => Some(AttrValue::Str(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_date(s: &str) -> Option<Timestamp> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(Timestamp::Naive);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(Timestamp::Naive)
}
