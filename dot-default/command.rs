use dot_lib::{
  Tendril,
  case_convention::toggle_case,
  document::Document,
  selection::Range,
  textobject,
  transaction::Transaction,
};
use serde::Serialize;

use crate::{
  CommandError,
  CommandResult,
};

/// Namespace the host registers the commands under.
pub const COMMAND_NAMESPACE: &str = "vsc-dotfiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
  SearchWordUnderCursor,
  SearchSelection,
  ToggleCasing,
}

impl Command {
  pub const ALL: [Command; 3] = [
    Command::SearchWordUnderCursor,
    Command::SearchSelection,
    Command::ToggleCasing,
  ];

  pub const fn name(self) -> &'static str {
    match self {
      Command::SearchWordUnderCursor => "searchWordUnderCursor",
      Command::SearchSelection => "searchSelection",
      Command::ToggleCasing => "toggleCasing",
    }
  }

  /// `name()` prefixed with [`COMMAND_NAMESPACE`].
  pub const fn qualified_name(self) -> &'static str {
    match self {
      Command::SearchWordUnderCursor => "vsc-dotfiles.searchWordUnderCursor",
      Command::SearchSelection => "vsc-dotfiles.searchSelection",
      Command::ToggleCasing => "vsc-dotfiles.toggleCasing",
    }
  }

  /// Alternate ids accepted by the registry.
  pub const fn aliases(self) -> &'static [&'static str] {
    match self {
      Command::SearchWordUnderCursor => &["vsc-dotfiles.searchWordUnderCursor"],
      Command::SearchSelection => &["vsc-dotfiles.searchSelection"],
      Command::ToggleCasing => &["vsc-dotfiles.toggleCasing"],
    }
  }

  pub const fn doc(self) -> &'static str {
    match self {
      Command::SearchWordUnderCursor => "Search all files for the word under the cursor",
      Command::SearchSelection => "Search all files for the selected text",
      Command::ToggleCasing => {
        "Toggle the selection or word under the cursor between snake_case and PascalCase"
      },
    }
  }
}

/// Resolves a bare (`toggleCasing`) or namespaced
/// (`vsc-dotfiles.toggleCasing`) command id.
pub fn command_from_name(name: &str) -> Option<Command> {
  let bare = match name.split_once('.') {
    Some((namespace, bare)) if namespace == COMMAND_NAMESPACE => bare,
    Some(_) => return None,
    None => name,
  };
  Command::ALL.into_iter().find(|command| command.name() == bare)
}

/// Arguments for the host's find-in-files panel, serialized as `{ "query" }`.
///
/// Only the query is sent. The panel keeps whatever regex, case and
/// whole-word toggles the user last set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
  pub query: String,
}

impl SearchRequest {
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
    }
  }
}

/// The token at the cursor as reported by the host.
///
/// Hosts that can name a word without locating it leave `range` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordUnderCursor {
  pub text:  Tendril,
  pub range: Option<Range>,
}

/// Host capabilities the commands run against.
pub trait DefaultContext: Sized + 'static {
  fn document(&self) -> &Document;
  fn document_mut(&mut self) -> &mut Document;

  /// Opens the host's find-in-files panel prefilled with the request. Nothing
  /// is reported back.
  fn find_in_files(&mut self, request: SearchRequest);

  /// Shows an error notification raised by `command`.
  fn show_error(&mut self, command: Command, message: &str);

  fn word_under_cursor(&self) -> Option<WordUnderCursor> {
    let doc = self.document();
    let text = doc.text().slice(..);
    let range = textobject::word_at(text, doc.selection().head)?;
    Some(WordUnderCursor {
      text:  Tendril::from(&*range.fragment(text)),
      range: Some(range),
    })
  }

  /// Applies the edit, returning `false` when the document rejects it.
  fn apply_transaction(&mut self, transaction: &Transaction) -> bool {
    match self.document_mut().apply_transaction(transaction) {
      Ok(()) => true,
      Err(err) => {
        tracing::warn!("edit rejected: {err}");
        false
      },
    }
  }
}

pub fn handle_command<Ctx: DefaultContext>(ctx: &mut Ctx, command: Command) -> CommandResult {
  tracing::debug!("running command {}", command.name());
  let result = match command {
    Command::SearchWordUnderCursor => search_word_under_cursor(ctx),
    Command::SearchSelection => search_selection(ctx),
    Command::ToggleCasing => toggle_casing(ctx),
  };

  if let Err(err) = &result {
    tracing::error!("{}: {err}", command.name());
    if matches!(err, CommandError::NoRangeAvailable) {
      ctx.show_error(command, &err.to_string());
    }
  }
  result
}

fn search_word_under_cursor<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  let word = ctx
    .word_under_cursor()
    .filter(|word| !word.text.is_empty())
    .ok_or(CommandError::NoWordUnderCursor)?;

  let request = SearchRequest::new(word.text.as_str());
  tracing::debug!("find in files: {:?}", request.query);
  ctx.find_in_files(request);
  Ok(())
}

fn search_selection<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  let doc = ctx.document();
  if doc.selection().is_empty() {
    return Err(CommandError::NoSelection);
  }
  let selected = doc.selected_text().into_owned();
  if selected.is_empty() {
    return Err(CommandError::NoSelection);
  }

  let request = SearchRequest::new(selected);
  tracing::debug!("find in files: {:?}", request.query);
  ctx.find_in_files(request);
  Ok(())
}

fn toggle_casing<Ctx: DefaultContext>(ctx: &mut Ctx) -> CommandResult {
  let selection = ctx.document().selection();
  let replacing_selection = !selection.is_empty();

  let (text, range) = if replacing_selection {
    let text = Tendril::from(&*ctx.document().selected_text());
    (text, selection)
  } else {
    let word = ctx
      .word_under_cursor()
      .filter(|word| !word.text.is_empty())
      .ok_or(CommandError::NoWordUnderCursor)?;
    let range = word.range.ok_or(CommandError::NoRangeAvailable)?;
    (word.text, range)
  };

  let toggled = toggle_case(&text);
  tracing::debug!("toggle casing {:?} -> {:?}", text, toggled);

  let doc = ctx.document();
  let new_len = toggled.chars().count();
  let transaction = match Transaction::replace(doc.text(), range, toggled) {
    Ok(transaction) => transaction.with_revision(doc.revision()),
    Err(err) => {
      tracing::warn!("edit rejected: {err}");
      return Ok(());
    },
  };
  // A replaced selection keeps covering the new text.
  let transaction = if replacing_selection {
    let from = range.from();
    transaction.with_selection(selection.with_bounds(from, from + new_len))
  } else {
    transaction
  };

  ctx.apply_transaction(&transaction);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_bare_and_namespaced_names() {
    for command in Command::ALL {
      assert_eq!(command_from_name(command.name()), Some(command));
      assert_eq!(command_from_name(command.qualified_name()), Some(command));
      assert_eq!(command.aliases(), &[command.qualified_name()]);
      assert_eq!(
        command.qualified_name(),
        format!("{COMMAND_NAMESPACE}.{}", command.name())
      );
    }
    assert_eq!(command_from_name("other.toggleCasing"), None);
    assert_eq!(command_from_name("toggle_casing"), None);
  }

  #[test]
  fn search_request_carries_only_the_query() {
    let request = SearchRequest::new("foo_bar");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "query": "foo_bar" }));
  }
}
