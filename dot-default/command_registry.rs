use std::{
  collections::HashMap,
  fmt,
  sync::Arc,
};

use thiserror::Error;

use crate::{
  Command,
  DefaultContext,
  handle_command,
};

pub type CommandFn<Ctx> = fn(&mut Ctx) -> CommandResult;

pub type CommandResult = Result<(), CommandError>;

/// Why a command invocation did nothing. None of these are retried; the user
/// fixes the cursor or selection and runs the command again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
  #[error("No word under cursor")]
  NoWordUnderCursor,
  #[error("No selection")]
  NoSelection,
  #[error("No range available for selection")]
  NoRangeAvailable,
  #[error("command not found: {0}")]
  UnknownCommand(String),
}

#[derive(Clone)]
pub struct TypableCommand<Ctx: 'static> {
  pub name:    &'static str,
  pub aliases: &'static [&'static str],
  pub doc:     &'static str,
  pub fun:     CommandFn<Ctx>,
}

impl<Ctx: 'static> TypableCommand<Ctx> {
  pub const fn new(
    name: &'static str,
    aliases: &'static [&'static str],
    doc: &'static str,
    fun: CommandFn<Ctx>,
  ) -> Self {
    Self {
      name,
      aliases,
      doc,
      fun,
    }
  }

  pub fn execute(&self, ctx: &mut Ctx) -> CommandResult {
    (self.fun)(ctx)
  }
}

impl<Ctx: 'static> fmt::Debug for TypableCommand<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypableCommand")
      .field("name", &self.name)
      .field("aliases", &self.aliases)
      .field("doc", &self.doc)
      .finish()
  }
}

/// Commands by bare and namespaced id, the way the host's command registry
/// sees them.
#[derive(Debug, Clone)]
pub struct CommandRegistry<Ctx: 'static> {
  commands: HashMap<String, Arc<TypableCommand<Ctx>>>,
}

impl<Ctx: DefaultContext + 'static> CommandRegistry<Ctx> {
  pub fn new() -> Self {
    let mut registry = Self {
      commands: HashMap::new(),
    };
    registry.register_builtin_commands();
    registry
  }

  pub fn register(&mut self, command: TypableCommand<Ctx>) {
    let cmd = Arc::new(command);
    self.commands.insert(cmd.name.to_string(), cmd.clone());
    for alias in cmd.aliases {
      self.commands.insert(alias.to_string(), cmd.clone());
    }
  }

  pub fn get(&self, name: &str) -> Option<&TypableCommand<Ctx>> {
    self.commands.get(name).map(|cmd| cmd.as_ref())
  }

  pub fn execute(&self, ctx: &mut Ctx, name: &str) -> CommandResult {
    match self.get(name) {
      Some(command) => command.execute(ctx),
      None => {
        tracing::error!("command not found: {name}");
        Err(CommandError::UnknownCommand(name.to_string()))
      },
    }
  }

  fn register_builtin_commands(&mut self) {
    self.register(TypableCommand::new(
      Command::SearchWordUnderCursor.name(),
      Command::SearchWordUnderCursor.aliases(),
      Command::SearchWordUnderCursor.doc(),
      cmd_search_word_under_cursor::<Ctx>,
    ));

    self.register(TypableCommand::new(
      Command::SearchSelection.name(),
      Command::SearchSelection.aliases(),
      Command::SearchSelection.doc(),
      cmd_search_selection::<Ctx>,
    ));

    self.register(TypableCommand::new(
      Command::ToggleCasing.name(),
      Command::ToggleCasing.aliases(),
      Command::ToggleCasing.doc(),
      cmd_toggle_casing::<Ctx>,
    ));
  }
}

impl<Ctx> Default for CommandRegistry<Ctx>
where
  Ctx: DefaultContext + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

fn cmd_search_word_under_cursor<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  handle_command(ctx, Command::SearchWordUnderCursor)
}

fn cmd_search_selection<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  handle_command(ctx, Command::SearchSelection)
}

fn cmd_toggle_casing<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  handle_command(ctx, Command::ToggleCasing)
}
