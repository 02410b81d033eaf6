//! Command grammar.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "graphlens",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: GraphCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GraphCommand {
    /// Add a node with optional JSON attributes
    AddNode {
        #[arg(long, allow_hyphen_values = true)]
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        data: Option<String>,
    },
    /// Merge JSON attributes into an existing node
    EditNode {
        #[arg(long, allow_hyphen_values = true)]
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        data: String,
    },
    /// Delete a node and every edge touching it
    DeleteNode {
        #[arg(long, allow_hyphen_values = true)]
        id: String,
    },
    /// Connect two existing nodes
    AddEdge {
        #[arg(long, allow_hyphen_values = true)]
        parent: String,
        #[arg(long, allow_hyphen_values = true)]
        child: String,
    },
    /// Repoint an existing edge
    EditEdge {
        #[arg(long, allow_hyphen_values = true)]
        parent: String,
        #[arg(long, allow_hyphen_values = true)]
        child: String,
        #[arg(long = "new_parent", alias = "new-parent", allow_hyphen_values = true)]
        new_parent: String,
        #[arg(long = "new_child", alias = "new-child", allow_hyphen_values = true)]
        new_child: String,
    },
    /// Delete an edge
    DeleteEdge {
        #[arg(long, allow_hyphen_values = true)]
        parent: String,
        #[arg(long, allow_hyphen_values = true)]
        child: String,
    },
    /// Remove all nodes and edges
    #[command(alias = "clean-start")]
    ClearStart,
    /// List available commands
    Help,
}

impl GraphCommand {
    /// Parse already tokenized arguments.
    pub fn parse_tokens<I, T>(tokens: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        CommandLine::try_parse_from(tokens).map(|line| line.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_node() {
        let cmd = GraphCommand::parse_tokens(["add-node", "--id", "A", "--data", r#"{"n": 1}"#])
            .unwrap();
        assert_eq!(
            cmd,
            GraphCommand::AddNode {
                id: "A".into(),
                data: Some(r#"{"n": 1}"#.into())
            }
        );
    }

    #[test]
    fn test_parse_edit_edge_flag_spellings() {
        let expected = GraphCommand::EditEdge {
            parent: "a".into(),
            child: "b".into(),
            new_parent: "c".into(),
            new_child: "d".into(),
        };
        let underscore = GraphCommand::parse_tokens([
            "edit-edge", "--parent", "a", "--child", "b", "--new_parent", "c", "--new_child", "d",
        ])
        .unwrap();
        let hyphen = GraphCommand::parse_tokens([
            "edit-edge", "--parent", "a", "--child", "b", "--new-parent", "c", "--new-child", "d",
        ])
        .unwrap();
        assert_eq!(underscore, expected);
        assert_eq!(hyphen, expected);
    }

    #[test]
    fn test_aliases_and_help() {
        assert_eq!(GraphCommand::parse_tokens(["clean-start"]).unwrap(), GraphCommand::ClearStart);
        assert_eq!(GraphCommand::parse_tokens(["clear-start"]).unwrap(), GraphCommand::ClearStart);
        assert_eq!(GraphCommand::parse_tokens(["help"]).unwrap(), GraphCommand::Help);
    }

    #[test]
    fn test_missing_argument_is_error() {
        assert!(GraphCommand::parse_tokens(["delete-node"]).is_err());
        assert!(GraphCommand::parse_tokens(["add-edge", "--parent", "a"]).is_err());
        assert!(GraphCommand::parse_tokens(["explode"]).is_err());
    }
}
