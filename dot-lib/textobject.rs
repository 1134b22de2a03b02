//! Word lookup around the cursor.

use dot_core::chars::char_is_word;
use ropey::RopeSlice;

use crate::selection::Range;

/// Range of the word touching `pos`, if any.
///
/// A word is a maximal run of [`char_is_word`] characters. The cursor may sit
/// on any character of the word or directly after its last one; when it sits
/// between two words the one starting at `pos` wins. Returns `None` past the
/// end of the text or when neither neighbour is a word character.
pub fn word_at(text: RopeSlice, pos: usize) -> Option<Range> {
  let len = text.len_chars();
  if pos > len {
    return None;
  }

  let seed = if pos < len && char_is_word(text.char(pos)) {
    pos
  } else if pos > 0 && char_is_word(text.char(pos - 1)) {
    pos - 1
  } else {
    return None;
  };

  let start = seed
    - text
      .chars_at(seed)
      .reversed()
      .take_while(|&c| char_is_word(c))
      .count();
  let end = seed
    + text
      .chars_at(seed)
      .take_while(|&c| char_is_word(c))
      .count();

  Some(Range::new(start, end))
}
