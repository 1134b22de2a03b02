//! Identifier casing toggle.
//!
//! Text containing an underscore is treated as snake_case and joined into
//! Pascal-style words. Anything else is split on ASCII capitals into
//! snake_case.
//!
//! ```
//! use dot_lib::case_convention::toggle_case;
//!
//! assert_eq!(toggle_case("foo_bar").as_str(), "FooBar");
//! assert_eq!(toggle_case("fooBar").as_str(), "foo_bar");
//! ```
//!
//! The two directions are not inverses of each other: `"FOO_BAR"` toggles to
//! `"FOOBAR"`, which toggles to `"f_o_o_b_a_r"`.

use crate::Tendril;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
  /// Contains at least one `_`, wherever it is.
  Snake,
  /// Everything else, including plain lowercase words and the empty string.
  Other,
}

pub fn classify(text: &str) -> CaseStyle {
  if text.contains('_') {
    CaseStyle::Snake
  } else {
    CaseStyle::Other
  }
}

pub fn toggle_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  toggle_case_with(text, &mut res);
  res
}

pub fn toggle_case_with(text: &str, buf: &mut Tendril) {
  match classify(text) {
    CaseStyle::Snake => snake_to_pascal_case_with(text.chars(), buf),
    CaseStyle::Other => split_to_snake_case_with(text.chars(), buf),
  }
}

pub fn snake_to_pascal_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  snake_to_pascal_case_with(text, &mut res);
  res
}

/// Joins `_x` pairs into `X` and capitalizes a leading ASCII lowercase
/// letter.
///
/// Pairs are matched leftmost first and never overlap. An underscore that is
/// not directly followed by an ASCII letter is copied through, so `a__b`
/// becomes `A_B`.
pub fn snake_to_pascal_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  let mut chars = text.peekable();
  let mut first = true;

  while let Some(c) = chars.next() {
    let out = match (c, chars.peek().copied()) {
      ('_', Some(next)) if next.is_ascii_alphabetic() => {
        let joined = next.to_ascii_uppercase();
        chars.next();
        joined
      },
      (c, _) if first => c.to_ascii_uppercase(),
      (c, _) => c,
    };
    buf.push(out);
    first = false;
  }
}

pub fn split_to_snake_case(text: impl Iterator<Item = char>) -> Tendril {
  let mut res = Tendril::new();
  split_to_snake_case_with(text, &mut res);
  res
}

/// Puts `_` in front of every ASCII capital, drops one leading `_` and
/// lowercases the result.
pub fn split_to_snake_case_with(text: impl Iterator<Item = char>, buf: &mut Tendril) {
  let mut split = String::new();
  let mut strip_leading = true;

  for c in text {
    if c.is_ascii_uppercase() {
      if !strip_leading {
        split.push('_');
      }
    } else if c == '_' && strip_leading {
      strip_leading = false;
      continue;
    }
    strip_leading = false;
    split.push(c);
  }

  // Lowercased as a whole: some mappings (final sigma) depend on context.
  buf.push_str(&split.to_lowercase());
}

#[cfg(test)]
mod test {
  use quickcheck::TestResult;

  use super::*;

  #[test]
  fn test_classify() {
    assert_eq!(classify("foo_bar"), CaseStyle::Snake);
    assert_eq!(classify("Foo_Bar"), CaseStyle::Snake);
    assert_eq!(classify("_"), CaseStyle::Snake);
    assert_eq!(classify("trailing_"), CaseStyle::Snake);
    assert_eq!(classify("fooBar"), CaseStyle::Other);
    assert_eq!(classify("foo"), CaseStyle::Other);
    assert_eq!(classify(""), CaseStyle::Other);
  }

  #[test]
  fn test_snake_to_pascal() {
    assert_eq!(toggle_case("foo_bar").as_str(), "FooBar");
    assert_eq!(toggle_case("Foo_Bar").as_str(), "FooBar");
    assert_eq!(toggle_case("hello_big_world").as_str(), "HelloBigWorld");
    assert_eq!(toggle_case("_private").as_str(), "Private");
    assert_eq!(toggle_case("FOO_BAR").as_str(), "FOOBAR");
  }

  #[test]
  fn test_snake_literal_underscores() {
    // Only `_` + ASCII letter is joined.
    assert_eq!(toggle_case("_").as_str(), "_");
    assert_eq!(toggle_case("trailing_").as_str(), "Trailing_");
    assert_eq!(toggle_case("v_1").as_str(), "V_1");
    assert_eq!(toggle_case("foo__bar").as_str(), "Foo_Bar");
    assert_eq!(toggle_case("__").as_str(), "__");
    assert_eq!(toggle_case("a_é").as_str(), "A_é");
  }

  #[test]
  fn test_leading_capital_is_ascii_only() {
    assert_eq!(toggle_case("1_a").as_str(), "1A");
    assert_eq!(toggle_case("é_a").as_str(), "éA");
  }

  #[test]
  fn test_other_to_snake() {
    assert_eq!(toggle_case("FooBar").as_str(), "foo_bar");
    assert_eq!(toggle_case("fooBar").as_str(), "foo_bar");
    assert_eq!(toggle_case("getHTTPResponse").as_str(), "get_h_t_t_p_response");
    assert_eq!(toggle_case("A").as_str(), "a");
    assert_eq!(toggle_case("already").as_str(), "already");
    assert_eq!(toggle_case("").as_str(), "");
  }

  #[test]
  fn test_other_lowercases_non_ascii() {
    // Only ASCII capitals start a word, but everything is lowercased.
    assert_eq!(toggle_case("ÉtéBon").as_str(), "été_bon");
  }

  #[test]
  fn test_other_lowercases_final_sigma() {
    assert_eq!(toggle_case("ΟΔΟΣ").as_str(), "οδος");
    assert_eq!(toggle_case("ΟΔΟΣ ΟΔΟΣ").as_str(), "οδος οδος");
    assert_eq!(toggle_case("ΣΑ").as_str(), "σα");
  }

  #[test]
  fn test_split_strips_single_leading_underscore() {
    assert_eq!(split_to_snake_case("Foo".chars()).as_str(), "foo");
    assert_eq!(split_to_snake_case("_Foo".chars()).as_str(), "_foo");
    assert_eq!(split_to_snake_case("_foo".chars()).as_str(), "foo");
  }

  #[test]
  fn test_toggle_is_not_an_involution() {
    let once = toggle_case("FOO_BAR");
    assert_eq!(once.as_str(), "FOOBAR");
    let twice = toggle_case(&once);
    assert_eq!(twice.as_str(), "f_o_o_b_a_r");
    assert_ne!(twice.as_str(), "FOO_BAR");
  }

  #[test]
  fn test_pascal_round_trips() {
    assert_eq!(toggle_case(&toggle_case("FooBar")).as_str(), "FooBar");
    assert_eq!(toggle_case(&toggle_case("foo_bar")).as_str(), "foo_bar");
  }

  #[test]
  fn test_toggle_with_appends() {
    let mut buf = Tendril::from("x = ");
    toggle_case_with("foo_bar", &mut buf);
    assert_eq!(buf.as_str(), "x = FooBar");
  }

  quickcheck::quickcheck! {
    fn lowercase_without_underscore_is_unchanged(s: String) -> TestResult {
      let lower = s
        .chars()
        .all(|c| c != '_' && c.to_lowercase().eq(std::iter::once(c)));
      if !lower {
        return TestResult::discard();
      }
      TestResult::from_bool(toggle_case(&s).as_str() == s)
    }

    fn underscore_always_classifies_as_snake(prefix: String, suffix: String) -> bool {
      classify(&format!("{prefix}_{suffix}")) == CaseStyle::Snake
    }
  }
}
