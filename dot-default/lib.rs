//! Default command behaviors for the editor integration.
//!
//! This crate is the policy layer on top of `dot-lib`: it turns the host's
//! document, cursor and selection (reached through [`DefaultContext`]) into
//! search requests and casing edits. Key bindings and configuration stay
//! with the host.

mod command;
mod command_registry;

pub use command::{
  COMMAND_NAMESPACE,
  Command,
  DefaultContext,
  SearchRequest,
  WordUnderCursor,
  command_from_name,
  handle_command,
};
pub use command_registry::{
  CommandError,
  CommandFn,
  CommandRegistry,
  CommandResult,
  TypableCommand,
};
