//! Applies parsed commands to a workspace.

use graphlens_core::{Error, Result};
use graphlens_model::{attributes_from_json, Attributes, CommandStatus, Node, Workspace};
use serde::Serialize;
use tracing::debug;

use crate::grammar::GraphCommand;
use crate::interpreter::HELP;

/// Status tier plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    pub message: String,
}

impl CommandOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            message: message.into(),
        }
    }

    fn from_flag(ok: bool, success: String, failure: String) -> Self {
        if ok {
            Self::success(success)
        } else {
            Self::warning(failure)
        }
    }
}

/// Borrows one workspace for the duration of a command.
pub struct CommandHandler<'a> {
    workspace: &'a mut Workspace,
}

impl<'a> CommandHandler<'a> {
    pub fn new(workspace: &'a mut Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &*self.workspace
    }

    /// Run `command`. Invalid input becomes an error outcome, never a panic.
    pub fn execute(&mut self, command: GraphCommand) -> CommandOutcome {
        debug!(workspace = self.workspace.id(), ?command, "executing command");
        match command {
            GraphCommand::AddNode { id, data } => self
                .add_node(&id, data.as_deref())
                .unwrap_or_else(|e| CommandOutcome::error(e.to_string())),
            GraphCommand::EditNode { id, data } => self
                .edit_node(&id, &data)
                .unwrap_or_else(|e| CommandOutcome::error(e.to_string())),
            GraphCommand::DeleteNode { id } => self.delete_node(&id),
            GraphCommand::AddEdge { parent, child } => self.add_edge(&parent, &child),
            GraphCommand::EditEdge {
                parent,
                child,
                new_parent,
                new_child,
            } => self.edit_edge(&parent, &child, &new_parent, &new_child),
            GraphCommand::DeleteEdge { parent, child } => self.delete_edge(&parent, &child),
            GraphCommand::ClearStart => self.clean_start(),
            GraphCommand::Help => CommandOutcome::success(HELP),
        }
    }

    pub fn add_node(&mut self, id: &str, data: Option<&str>) -> Result<CommandOutcome> {
        let attributes = match data {
            Some(raw) => parse_data(raw)?,
            None => Attributes::new(),
        };
        let node = Node::new(id, attributes)?;
        Ok(CommandOutcome::from_flag(
            self.workspace.add_node(node),
            format!("Node {id} added."),
            format!("Node {id} already exists."),
        ))
    }

    pub fn edit_node(&mut self, id: &str, data: &str) -> Result<CommandOutcome> {
        let attributes = parse_data(data)?;
        let shown = serde_json::to_string(&attributes)?;
        Ok(CommandOutcome::from_flag(
            self.workspace.edit_node(id, attributes),
            format!("Node {id} updated with {shown}."),
            format!("Node {id} does not exist."),
        ))
    }

    pub fn delete_node(&mut self, id: &str) -> CommandOutcome {
        CommandOutcome::from_flag(
            self.workspace.delete_node(id),
            format!("Node {id} and its edges deleted."),
            format!("Node {id} does not exist."),
        )
    }

    pub fn add_edge(&mut self, parent: &str, child: &str) -> CommandOutcome {
        CommandOutcome::from_flag(
            self.workspace.add_edge(parent, child),
            format!("Edge {parent} -> {child} created."),
            format!(
                "Edge {parent} -> {child} was not created: both nodes must exist and the edge must be new."
            ),
        )
    }

    pub fn edit_edge(
        &mut self,
        parent: &str,
        child: &str,
        new_parent: &str,
        new_child: &str,
    ) -> CommandOutcome {
        CommandOutcome::from_flag(
            self.workspace.edit_edge(parent, child, new_parent, new_child),
            format!("Edge {parent} -> {child} updated to {new_parent} -> {new_child}."),
            format!(
                "Edge {parent} -> {child} was not updated: it must exist, both new nodes must exist and {new_parent} -> {new_child} must be free."
            ),
        )
    }

    pub fn delete_edge(&mut self, parent: &str, child: &str) -> CommandOutcome {
        CommandOutcome::from_flag(
            self.workspace.delete_edge(parent, child),
            format!("Edge {parent} -> {child} deleted."),
            format!("Edge {parent} -> {child} does not exist."),
        )
    }

    pub fn clean_start(&mut self) -> CommandOutcome {
        self.workspace.clean_start();
        CommandOutcome::success("Workspace cleared (all nodes and edges deleted).")
    }
}

fn parse_data(raw: &str) -> Result<Attributes> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::Command(format!("--data is not valid JSON: {e}")))?;
    attributes_from_json(&value)
}
