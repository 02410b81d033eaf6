//! Text searches over node attribute keys and values.

use serde::Serialize;

use crate::node::Node;

/// A whole-token search.
///
/// Matches when the case-folded query equals the case-folded text of some
/// attribute value, or equals an attribute key exactly. Keys are compared
/// case-sensitively against the folded query. This is token equality, not
/// substring containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Search {
    id: u64,
    query: String,
}

impl Search {
    pub fn new(id: u64, query: impl Into<String>) -> Self {
        Self {
            id,
            query: query.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, node: &Node) -> bool {
        let needle = self.query.to_lowercase();
        node.data()
            .values()
            .any(|value| value.to_string().to_lowercase() == needle)
            || node.data().keys().any(|key| *key == needle)
    }
}
