//! Document state handed to command handlers.
//!
//! The document owns the text buffer and one primary selection, and evolves
//! only through [`Document::apply_transaction`]. Every applied edit bumps the
//! revision, so a transaction pinned to an older revision is rejected.
//!
//! ```
//! use dot_lib::{document::Document, selection::Range, transaction::Transaction};
//! use ropey::Rope;
//!
//! let mut doc = Document::new(Rope::from("hello"));
//! let tx = Transaction::replace(doc.text(), Range::point(5), " world".into())
//!   .unwrap()
//!   .with_revision(doc.revision());
//! doc.apply_transaction(&tx).unwrap();
//! assert_eq!(doc.text().to_string(), "hello world");
//! ```

use std::borrow::Cow;

use ropey::Rope;
use thiserror::Error;

use crate::{
  selection::Range,
  transaction::{
    Transaction,
    TransactionError,
  },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFlags {
  pub readonly: bool,
  pub modified: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
  #[error("document is readonly")]
  Readonly,
  #[error(transparent)]
  Transaction(#[from] TransactionError),
}

#[derive(Debug, Clone)]
pub struct Document {
  text:      Rope,
  selection: Range,
  revision:  u64,
  flags:     DocumentFlags,
}

impl Document {
  pub fn new(text: Rope) -> Self {
    Self {
      text,
      selection: Range::point(0),
      revision: 0,
      flags: DocumentFlags::default(),
    }
  }

  #[must_use]
  pub fn with_selection(mut self, selection: Range) -> Self {
    self.set_selection(selection);
    self
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn selection(&self) -> Range {
    self.selection
  }

  /// Clamps both ends into the text.
  pub fn set_selection(&mut self, selection: Range) {
    let len = self.text.len_chars();
    self.selection = Range::new(selection.anchor.min(len), selection.head.min(len));
  }

  /// Text under the selection, empty for a point cursor.
  pub fn selected_text(&self) -> Cow<'_, str> {
    self.selection.fragment(self.text.slice(..))
  }

  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn flags(&self) -> DocumentFlags {
    self.flags
  }

  pub fn set_readonly(&mut self, readonly: bool) {
    self.flags.readonly = readonly;
  }

  pub fn is_modified(&self) -> bool {
    self.flags.modified
  }

  pub fn apply_transaction(&mut self, transaction: &Transaction) -> Result<(), DocumentError> {
    if self.flags.readonly {
      return Err(DocumentError::Readonly);
    }
    match transaction.revision() {
      Some(expected) if expected != self.revision => {
        return Err(
          TransactionError::StaleRevision {
            expected,
            actual: self.revision,
          }
          .into(),
        );
      },
      _ => {},
    }
    if transaction.is_empty() {
      return Ok(());
    }

    transaction.apply(&mut self.text)?;

    let selection = transaction
      .selection()
      .unwrap_or_else(|| transaction.map_range(self.selection));
    self.set_selection(selection);
    self.revision += 1;
    self.flags.modified = true;
    tracing::trace!("applied transaction, document at revision {}", self.revision);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selection_is_clamped() {
    let doc = Document::new(Rope::from("abc")).with_selection(Range::new(1, 10));
    assert_eq!(doc.selection(), Range::new(1, 3));
    assert_eq!(doc.selected_text(), "bc");
  }

  #[test]
  fn apply_bumps_revision_and_maps_cursor() {
    let mut doc = Document::new(Rope::from("x foo_bar y")).with_selection(Range::point(11));
    let tx = Transaction::replace(doc.text(), Range::new(2, 9), "FooBar".into())
      .unwrap()
      .with_revision(0);
    doc.apply_transaction(&tx).unwrap();

    assert_eq!(doc.text().to_string(), "x FooBar y");
    assert_eq!(doc.selection(), Range::point(10));
    assert_eq!(doc.revision(), 1);
    assert!(doc.is_modified());
  }

  #[test]
  fn stale_transaction_is_rejected() {
    let mut doc = Document::new(Rope::from("hello"));
    let stale = Transaction::replace(doc.text(), Range::new(0, 1), "j".into())
      .unwrap()
      .with_revision(doc.revision());

    let bump = Transaction::replace(doc.text(), Range::new(4, 5), "O".into()).unwrap();
    doc.apply_transaction(&bump).unwrap();

    assert_eq!(
      doc.apply_transaction(&stale).unwrap_err(),
      DocumentError::Transaction(TransactionError::StaleRevision {
        expected: 0,
        actual:   1,
      })
    );
    assert_eq!(doc.text().to_string(), "hellO");
  }

  #[test]
  fn readonly_document_rejects_edits() {
    let mut doc = Document::new(Rope::from("hello"));
    doc.set_readonly(true);
    let tx = Transaction::replace(doc.text(), Range::new(0, 5), "bye".into()).unwrap();
    assert_eq!(doc.apply_transaction(&tx).unwrap_err(), DocumentError::Readonly);
    assert!(!doc.is_modified());
  }

  #[test]
  fn explicit_selection_wins_over_mapping() {
    let mut doc = Document::new(Rope::from("fooBar")).with_selection(Range::new(0, 6));
    let tx = Transaction::replace(doc.text(), Range::new(0, 6), "foo_bar".into())
      .unwrap()
      .with_selection(Range::new(0, 7));
    doc.apply_transaction(&tx).unwrap();
    assert_eq!(doc.selected_text(), "foo_bar");
  }
}
