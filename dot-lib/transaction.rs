//! Text replacements applied to a document as one atomic edit.
//!
//! A [`Transaction`] is a list of `(from, to, replacement)` changes in char
//! offsets, recorded against the text length (and optionally the document
//! revision) it was built for. Applying it to a different text fails with a
//! [`TransactionError`] and leaves the text untouched.
//!
//! ```
//! use dot_lib::transaction::Transaction;
//! use ropey::Rope;
//!
//! let mut doc = Rope::from("hello world");
//! let tx = Transaction::change(&doc, vec![(6, 11, Some("rust".into()))]).unwrap();
//! tx.apply(&mut doc).unwrap();
//! assert_eq!(doc.to_string(), "hello rust");
//! ```

use ropey::Rope;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
  Tendril,
  selection::Range,
};

pub type Result<T> = std::result::Result<T, TransactionError>;

/// `(from, to, replacement)`; `None` deletes.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransactionError {
  #[error("change {from}..{to} is inverted")]
  InvalidRange { from: usize, to: usize },
  #[error("change {from}..{to} overlaps the previous change ending at {prev_to}")]
  Overlapping {
    from:    usize,
    to:      usize,
    prev_to: usize,
  },
  #[error("change {from}..{to} is out of bounds for text of length {len}")]
  OutOfBounds { from: usize, to: usize, len: usize },
  #[error("transaction built for text of length {expected}, found {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("transaction built for revision {expected}, document is at {actual}")]
  StaleRevision { expected: u64, actual: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
  changes:   SmallVec<[Change; 1]>,
  len_chars: usize,
  revision:  Option<u64>,
  selection: Option<Range>,
}

impl Transaction {
  /// Builds a transaction from changes sorted by position.
  pub fn change<I>(doc: &Rope, changes: I) -> Result<Self>
  where
    I: IntoIterator<Item = Change>,
  {
    let len = doc.len_chars();
    let mut prev_to = 0;
    let mut collected = SmallVec::new();

    for (from, to, text) in changes {
      if from > to {
        return Err(TransactionError::InvalidRange { from, to });
      }
      if to > len {
        return Err(TransactionError::OutOfBounds { from, to, len });
      }
      if from < prev_to {
        return Err(TransactionError::Overlapping { from, to, prev_to });
      }
      prev_to = to;
      collected.push((from, to, text));
    }

    Ok(Self {
      changes:   collected,
      len_chars: len,
      revision:  None,
      selection: None,
    })
  }

  /// Single replacement of `range` with `text`.
  pub fn replace(doc: &Rope, range: Range, text: Tendril) -> Result<Self> {
    Self::change(doc, [(range.from(), range.to(), Some(text))])
  }

  /// Pins the transaction to a document revision.
  #[must_use]
  pub fn with_revision(mut self, revision: u64) -> Self {
    self.revision = Some(revision);
    self
  }

  /// Selection to install after applying, instead of mapping the old one.
  #[must_use]
  pub fn with_selection(mut self, selection: Range) -> Self {
    self.selection = Some(selection);
    self
  }

  pub fn changes(&self) -> &[Change] {
    &self.changes
  }

  pub fn revision(&self) -> Option<u64> {
    self.revision
  }

  pub fn selection(&self) -> Option<Range> {
    self.selection
  }

  pub fn is_empty(&self) -> bool {
    self.changes.is_empty()
  }

  pub fn apply(&self, doc: &mut Rope) -> Result<()> {
    let actual = doc.len_chars();
    if actual != self.len_chars {
      return Err(TransactionError::LengthMismatch {
        expected: self.len_chars,
        actual,
      });
    }

    // Back to front so earlier offsets stay valid.
    for (from, to, text) in self.changes.iter().rev() {
      doc.remove(*from..*to);
      if let Some(text) = text {
        doc.insert(*from, text);
      }
    }
    Ok(())
  }

  pub fn apply_to(&self, doc: &Rope) -> Result<Rope> {
    let mut doc = doc.clone();
    self.apply(&mut doc)?;
    Ok(doc)
  }

  /// Maps a char offset in the old text to the new text.
  ///
  /// Offsets inside a replaced span are clamped to the end of its
  /// replacement.
  pub fn map_pos(&self, pos: usize) -> usize {
    let mut delta: isize = 0;
    for (from, to, text) in &self.changes {
      let inserted = text.as_ref().map_or(0, |text| text.chars().count());
      if pos <= *from {
        break;
      }
      if pos < *to {
        let clamped = (pos as isize + delta).min(*from as isize + delta + inserted as isize);
        return clamped.max(0) as usize;
      }
      delta += inserted as isize - (to - from) as isize;
    }
    (pos as isize + delta).max(0) as usize
  }

  pub fn map_range(&self, range: Range) -> Range {
    Range::new(self.map_pos(range.anchor), self.map_pos(range.head))
  }
}
