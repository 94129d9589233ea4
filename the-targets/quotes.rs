//! Quote characters that delimit text objects.
//!
//! Unlike brackets, a quote opens and closes with the same character, so the
//! alphabet is just a set.

use std::borrow::Cow;

use the_core::chars::{
  char_is_escape,
  char_is_line_ending,
};
use thiserror::Error;

/// `'`, `"` and `` ` ``.
pub const DEFAULT_QUOTES: Quotes = Quotes(Cow::Borrowed(&['\'', '"', '`']));

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QuotesError {
  #[error("list of quotes is empty")]
  Empty,
  #[error("'\\' escapes quotes and can not be a quote itself")]
  Escape,
  #[error("line ending {0:?} can not be a quote")]
  LineEnding(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotes(Cow<'static, [char]>);

impl Quotes {
  /// Builds a quote set from every char of `list`. Duplicates are dropped.
  pub fn parse(list: &str) -> Result<Self, QuotesError> {
    let mut quotes = Vec::new();
    for ch in list.chars() {
      if char_is_escape(ch) {
        return Err(QuotesError::Escape);
      }
      if char_is_line_ending(ch) {
        return Err(QuotesError::LineEnding(ch));
      }
      if !quotes.contains(&ch) {
        quotes.push(ch);
      }
    }
    if quotes.is_empty() {
      return Err(QuotesError::Empty);
    }
    Ok(Self(Cow::Owned(quotes)))
  }

  pub fn is_quote(&self, ch: char) -> bool {
    self.0.contains(&ch)
  }

  pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
    self.0.iter().copied()
  }
}

impl Default for Quotes {
  fn default() -> Self {
    DEFAULT_QUOTES
  }
}
