//! GraphLens Model: nodes, edges, graphs, filters, searches and workspaces.
//!
//! A [`Workspace`] owns a base [`Graph`] plus ordered [`Filter`]s and
//! [`Search`]es, and derives the visible subgraph on every read.

pub mod edge;
pub mod filter;
pub mod graph;
pub mod ids;
pub mod node;
pub mod search;
pub mod service;
pub mod value;
pub mod workspace;

pub use edge::Edge;
pub use filter::{Filter, FilterOperator};
pub use graph::Graph;
pub use ids::IdAllocator;
pub use node::Node;
pub use search::Search;
pub use service::{WorkspaceService, INITIAL_WORKSPACE_NAME};
pub use value::{attributes_from_json, AttrValue, Attributes, Timestamp, ValueKind};
pub use workspace::{CliEntry, CommandStatus, Workspace, WorkspaceSummary};
