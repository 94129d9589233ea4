//! Bracket pairs that delimit text objects.
//!
//! The pair list uses the same syntax as Vim's `matchpairs` option: a comma
//! separated list of `open:close` entries, one character on each side.
//!
//! ```
//! use the_targets::pairs::Pairs;
//!
//! let pairs = Pairs::parse("(:),{:}").unwrap();
//! assert!(pairs.is_open('{'));
//! assert_eq!(pairs.matching('}'), Some('{'));
//! assert!(Pairs::parse("(:(").is_err());
//! ```

use std::{
  borrow::Cow,
  fmt,
  str::FromStr,
};

use thiserror::Error;

/// `(:),<:>,[:],{:}`
pub const DEFAULT_PAIRS: Pairs = Pairs {
  open:  Cow::Borrowed(&['(', '<', '[', '{']),
  close: Cow::Borrowed(&[')', '>', ']', '}']),
};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ParseError {
  #[error("expecting ':', but got '{0}' instead")]
  ExpectedColon(char),
  #[error("expecting ',', but got '{0}' instead")]
  ExpectedComma(char),
  #[error("list of pairs is incomplete")]
  Incomplete,
  #[error("open and close brackets must be different, got '{0}' for both")]
  SameOpenClose(char),
}

/// Ordered open/close bracket table. `open[i]` matches `close[i]`; lookups
/// are linear so the earliest declared pair wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairs {
  open:  Cow<'static, [char]>,
  close: Cow<'static, [char]>,
}

#[derive(Clone, Copy)]
enum ParseState {
  Open,
  Colon,
  Close(char),
  Comma,
}

impl Pairs {
  pub fn parse(list: &str) -> Result<Self, ParseError> {
    let mut open = Vec::new();
    let mut close = Vec::new();
    let mut state = ParseState::Open;

    for ch in list.chars() {
      state = match state {
        ParseState::Open => ParseState::Colon,
        ParseState::Colon if ch == ':' => {
          ParseState::Close(open.last().copied().ok_or(ParseError::Incomplete)?)
        },
        ParseState::Colon => return Err(ParseError::ExpectedColon(ch)),
        ParseState::Close(last_open) if last_open == ch => {
          return Err(ParseError::SameOpenClose(ch));
        },
        ParseState::Close(_) => {
          close.push(ch);
          ParseState::Comma
        },
        ParseState::Comma if ch == ',' => ParseState::Open,
        ParseState::Comma => return Err(ParseError::ExpectedComma(ch)),
      };
      if matches!(state, ParseState::Colon) {
        open.push(ch);
      }
    }

    if !matches!(state, ParseState::Comma) {
      return Err(ParseError::Incomplete);
    }

    Ok(Self {
      open:  Cow::Owned(open),
      close: Cow::Owned(close),
    })
  }

  pub fn is_open(&self, ch: char) -> bool {
    self.open.contains(&ch)
  }

  pub fn is_close(&self, ch: char) -> bool {
    self.close.contains(&ch)
  }

  /// The partner of `ch`, checking close brackets first. `None` when `ch`
  /// is not a bracket at all.
  pub fn matching(&self, ch: char) -> Option<char> {
    if let Some(idx) = self.close.iter().position(|&c| c == ch) {
      return Some(self.open[idx]);
    }
    let idx = self.open.iter().position(|&c| c == ch)?;
    Some(self.close[idx])
  }

  /// `true` when `open` and `close` form a declared pair (in that order).
  pub fn is_pair(&self, open: char, close: char) -> bool {
    self.is_open(open) && self.matching(open) == Some(close)
  }

  pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
    self.open.iter().copied().zip(self.close.iter().copied())
  }

  pub fn len(&self) -> usize {
    self.open.len()
  }

  pub fn is_empty(&self) -> bool {
    self.open.is_empty()
  }
}

impl Default for Pairs {
  fn default() -> Self {
    DEFAULT_PAIRS
  }
}

impl FromStr for Pairs {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for Pairs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (open, close)) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(",")?;
      }
      write!(f, "{open}:{close}")?;
    }
    Ok(())
  }
}
