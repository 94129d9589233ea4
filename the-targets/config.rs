//! User configuration for pair and quote text objects.
//!
//! Every key is optional:
//!
//! ```toml
//! pairs = "(:),[:],{:}"
//! quotes = "'\""
//! max-search-lines = 10
//! max-search-offset = 800
//! ```

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  pairs::{
    DEFAULT_PAIRS,
    Pairs,
    ParseError,
  },
  quotes::{
    DEFAULT_QUOTES,
    Quotes,
    QuotesError,
  },
};

pub const DEFAULT_MAX_SEARCH_LINES: usize = 10;
/// Rough width of a line, used to turn the line limit into a char limit.
pub const AVERAGE_LINE_WIDTH: usize = 80;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse targets config: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("invalid value of pairs: {0}")]
  Pairs(#[from] ParseError),
  #[error("invalid value of quotes: {0}")]
  Quotes(#[from] QuotesError),
  #[error("{0} must be greater than zero")]
  InvalidLimit(&'static str),
}

/// How far an enclosing-pair search may travel from the cursor. The tighter
/// of the two limits applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
  /// Lines above and below the cursor line.
  pub lines:  usize,
  /// Chars before and after the cursor.
  pub offset: usize,
}

impl Default for SearchLimits {
  fn default() -> Self {
    Self::from_lines(DEFAULT_MAX_SEARCH_LINES)
  }
}

impl SearchLimits {
  pub const fn from_lines(lines: usize) -> Self {
    Self {
      lines,
      offset: lines.saturating_mul(AVERAGE_LINE_WIDTH),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// `open:close` list, see [`Pairs::parse`].
  pub pairs:             Option<String>,
  pub quotes:            Option<String>,
  pub max_search_lines:  usize,
  /// Defaults to `max_search_lines * AVERAGE_LINE_WIDTH`.
  pub max_search_offset: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      pairs:             None,
      quotes:            None,
      max_search_lines:  DEFAULT_MAX_SEARCH_LINES,
      max_search_offset: None,
    }
  }
}

impl Config {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }

  pub fn pairs(&self) -> Result<Pairs, ParseError> {
    match &self.pairs {
      Some(list) => Pairs::parse(list),
      None => Ok(DEFAULT_PAIRS),
    }
  }

  pub fn quotes(&self) -> Result<Quotes, QuotesError> {
    match &self.quotes {
      Some(list) => Quotes::parse(list),
      None => Ok(DEFAULT_QUOTES),
    }
  }

  pub fn limits(&self) -> Result<SearchLimits, ConfigError> {
    if self.max_search_lines == 0 {
      return Err(ConfigError::InvalidLimit("max-search-lines"));
    }
    let mut limits = SearchLimits::from_lines(self.max_search_lines);
    if let Some(offset) = self.max_search_offset {
      if offset == 0 {
        return Err(ConfigError::InvalidLimit("max-search-offset"));
      }
      limits.offset = offset;
    }
    Ok(limits)
  }
}
