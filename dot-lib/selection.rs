//! Cursor and selection ranges.
//!
//! A [`Range`] has two char offsets: `anchor` and `head`. The `head` is where
//! the cursor sits, the `anchor` is the other end of the selection. When
//! `anchor == head` the range is a point cursor with nothing selected.
//!
//! ```text
//! anchor=2, head=7: "he[llo w]orld"  (forward selection)
//! anchor=7, head=2: "he]llo w[orld"  (backward selection)
//! anchor=5, head=5: "hello|world"    (point/cursor)
//! ```

use std::borrow::Cow;

use ropey::RopeSlice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  Forward,
  Backward,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range, whatever its direction.
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range, whatever its direction.
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.to() - self.from()
  }

  /// A point cursor selects nothing.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  #[inline]
  pub fn contains(&self, pos: usize) -> bool {
    self.from() <= pos && pos < self.to()
  }

  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      Self::new(self.head, self.anchor)
    }
  }

  /// Same direction, new bounds.
  #[must_use]
  pub fn with_bounds(self, from: usize, to: usize) -> Self {
    Self::new(from, to).with_direction(self.direction())
  }

  /// Whether both ends lie inside a text of `len_chars` chars.
  pub fn fits(&self, len_chars: usize) -> bool {
    self.to() <= len_chars
  }

  #[inline]
  pub fn fragment<'a, 'b: 'a>(&'a self, text: RopeSlice<'b>) -> Cow<'b, str> {
    self.slice(text).into()
  }

  #[inline]
  pub fn slice<'a, 'b: 'a>(&'a self, text: RopeSlice<'b>) -> RopeSlice<'b> {
    text.slice(self.from()..self.to())
  }
}

impl From<(usize, usize)> for Range {
  fn from((anchor, head): (usize, usize)) -> Self {
    Self::new(anchor, head)
  }
}
