//! GraphLens Commands: `add-node --id A --data {...}` style commands
//! translated into workspace mutations.

pub mod grammar;
pub mod handler;
pub mod interpreter;
pub mod tokenize;

pub use grammar::GraphCommand;
pub use handler::{CommandHandler, CommandOutcome};
pub use interpreter::{run_command, HELP};
pub use tokenize::tokenize;
