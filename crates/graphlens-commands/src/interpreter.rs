//! Line-oriented command interpreter.
//!
//! A line is tokenized, parsed with the clap grammar and dispatched through
//! [`CommandHandler`]. Every interpreted line lands in the workspace's
//! `cli_history` together with its reply.

use clap::error::ErrorKind;
use graphlens_model::{CliEntry, CommandStatus, Workspace};
use tracing::{info, warn};

use crate::grammar::GraphCommand;
use crate::handler::{CommandHandler, CommandOutcome};
use crate::tokenize::tokenize;

pub const HELP: &str = "\
Available commands:
  add-node --id <id> [--data <json object>]
  edit-node --id <id> --data <json object>
  delete-node --id <id>
  add-edge --parent <id> --child <id>
  edit-edge --parent <id> --child <id> --new_parent <id> --new_child <id>
  delete-edge --parent <id> --child <id>
  clear-start (alias: clean-start)
  help";

/// Interpret `line` against `workspace` and record it in the history.
pub fn run_command(workspace: &mut Workspace, line: &str) -> CommandOutcome {
    let line = line.trim();
    if line.is_empty() {
        return CommandOutcome::warning("No command entered.");
    }

    let outcome = interpret(workspace, line);
    match outcome.status {
        CommandStatus::Error => warn!(workspace = workspace.id(), command = line, "{}", outcome.message),
        _ => info!(workspace = workspace.id(), command = line, status = ?outcome.status, "command interpreted"),
    }
    workspace.record_command(CliEntry {
        command: line.to_string(),
        response: outcome.message.clone(),
        status: outcome.status,
    });
    outcome
}

fn interpret(workspace: &mut Workspace, line: &str) -> CommandOutcome {
    let mut tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => return CommandOutcome::error(e.to_string()),
    };
    if let Some(name) = tokens.first_mut() {
        *name = name.to_lowercase();
    }

    match GraphCommand::parse_tokens(tokens) {
        Ok(command) => CommandHandler::new(workspace).execute(command),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            CommandOutcome::success(e.to_string().trim_end().to_string())
        }
        Err(e) => CommandOutcome::error(e.to_string().trim_end().to_string()),
    }
}
