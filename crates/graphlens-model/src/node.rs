//! Graph node: a non-blank id plus typed attributes.

use std::fmt;

use graphlens_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::value::{AttrValue, Attributes};

/// A node in a graph.
///
/// Id uniqueness is a property of the owning graph, enforced by the
/// workspace mutation API rather than here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord")]
pub struct Node {
    id: String,
    data: Attributes,
}

#[derive(Deserialize)]
struct NodeRecord {
    id: String,
    #[serde(default)]
    data: Attributes,
}

impl TryFrom<NodeRecord> for Node {
    type Error = Error;

    fn try_from(record: NodeRecord) -> Result<Self> {
        Node::new(record.id, record.data)
    }
}

impl Node {
    /// Create a node, rejecting blank ids.
    pub fn new(id: impl Into<String>, data: Attributes) -> Result<Self> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self { id, data })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        validate_id(&id)?;
        self.id = id;
        Ok(())
    }

    pub fn data(&self) -> &Attributes {
        &self.data
    }

    pub fn set_data(&mut self, data: Attributes) {
        self.data = data;
    }

    pub fn get(&self, attribute: &str) -> Option<&AttrValue> {
        self.data.get(attribute)
    }

    /// Merge attributes into this node, overwriting existing keys.
    pub fn merge(&mut self, attributes: Attributes) {
        self.data.extend(attributes);
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidNodeId(id.to_string()));
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for (key, value) in &self.data {
            write!(f, "\n\t{key}: {value}")?;
        }
        Ok(())
    }
}
