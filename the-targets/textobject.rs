//! Inner/outer pair text objects.
//!
//! [`Targets`] runs the bracket and quote searches for a cursor, keeps the
//! nearest candidate and converts it into the half-open [`Range`] that the
//! host selects or operates on. Nothing here touches the host's cursor or
//! selection; on error the host should leave both alone.

use ropey::RopeSlice;
use smallvec::SmallVec;
use the_core::TextBuffer;
use thiserror::Error;

use crate::{
  SearchError,
  Span,
  config::{
    Config,
    ConfigError,
    SearchLimits,
  },
  pairs::{
    DEFAULT_PAIRS,
    Pairs,
    ParseError,
  },
  quote_spans::find_quote_bounds,
  quotes::{
    DEFAULT_QUOTES,
    Quotes,
  },
  select::select_nearest,
  surround::find_pair_bounds,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextObject {
  /// Between the delimiters.
  Inside,
  /// Including the delimiters.
  Around,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("empty document")]
  EmptyBuffer,
  #[error("can not find any pairs or quotes ({0})")]
  NotFound(SearchError),
  #[error("invalid value of pairs: {0}")]
  InvalidPairs(#[from] ParseError),
}

impl From<SearchError> for Error {
  fn from(err: SearchError) -> Self {
    match err {
      SearchError::EmptyBuffer => Self::EmptyBuffer,
      err => Self::NotFound(err),
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A half-open char range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub start: usize,
  pub end:   usize,
}

impl Range {
  pub const fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  /// Converts a delimiter match into the selected range.
  pub const fn from_span(span: Span, object: TextObject) -> Self {
    match object {
      TextObject::Inside => Self::new(span.start + 1, span.end),
      TextObject::Around => Self::new(span.start, span.end + 1),
    }
  }

  pub const fn len(&self) -> usize {
    self.end - self.start
  }

  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn slice<'a>(&self, text: RopeSlice<'a>) -> RopeSlice<'a> {
    text.slice(self.start..self.end)
  }
}

/// Pair and quote text-object finder.
///
/// Immutable once built, so one instance can serve every cursor and every
/// query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
  pairs:  Pairs,
  quotes: Quotes,
  limits: SearchLimits,
}

impl Targets {
  pub fn new(pairs: Pairs, quotes: Quotes, limits: SearchLimits) -> Self {
    Self {
      pairs,
      quotes,
      limits,
    }
  }

  pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
    Ok(Self::new(config.pairs()?, config.quotes()?, config.limits()?))
  }

  pub fn pairs(&self) -> &Pairs {
    &self.pairs
  }

  pub fn quotes(&self) -> &Quotes {
    &self.quotes
  }

  pub fn limits(&self) -> SearchLimits {
    self.limits
  }

  /// Finds the delimiters of the `count`-th text object at `pos`, before the
  /// inner/outer adjustment. A `count` of zero is treated as one.
  pub fn find_span<T: TextBuffer + ?Sized>(
    &self,
    text: &T,
    pos: usize,
    count: usize,
  ) -> Result<Span> {
    let count = count.max(1);
    let bracket = find_pair_bounds(text, &self.pairs, self.limits, pos, count);
    let quote = find_quote_bounds(text, &self.quotes, pos, count).map(|quote| quote.span());
    let span = select_nearest(text, pos, bracket, quote).inspect_err(|err| {
      tracing::debug!(pos, count, %err, "no pair or quote found");
    })?;
    tracing::debug!(pos, count, ?span, ?bracket, ?quote, "selected text object");
    Ok(span)
  }

  pub fn find<T: TextBuffer + ?Sized>(
    &self,
    text: &T,
    pos: usize,
    count: usize,
    object: TextObject,
  ) -> Result<Range> {
    let span = self.find_span(text, pos, count)?;
    Ok(Range::from_span(span, object))
  }

  /// Runs [`Targets::find`] for every cursor independently.
  pub fn find_all<T: TextBuffer + ?Sized>(
    &self,
    text: &T,
    cursors: &[usize],
    count: usize,
    object: TextObject,
  ) -> SmallVec<[Result<Range>; 1]> {
    cursors
      .iter()
      .map(|&pos| self.find(text, pos, count, object))
      .collect()
  }
}

/// One-shot lookup with the default quotes and search limits.
///
/// `pairs` is an optional `open:close,...` list replacing the default
/// brackets. An invalid list is reported without searching.
pub fn find_text_object<T: TextBuffer + ?Sized>(
  text: &T,
  pos: usize,
  count: usize,
  object: TextObject,
  pairs: Option<&str>,
) -> Result<Range> {
  let pairs = match pairs {
    Some(list) => Pairs::parse(list).inspect_err(|err| {
      tracing::warn!(%err, list, "invalid pair list");
    })?,
    None => DEFAULT_PAIRS,
  };
  Targets::new(pairs, DEFAULT_QUOTES, SearchLimits::default()).find(text, pos, count, object)
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  fn inside(text: &str, pos: usize, count: usize) -> Result<String> {
    let doc = Rope::from(text);
    find_text_object(&doc, pos, count, TextObject::Inside, None)
      .map(|range| range.slice(doc.slice(..)).to_string())
  }

  fn around(text: &str, pos: usize, count: usize) -> Result<String> {
    let doc = Rope::from(text);
    find_text_object(&doc, pos, count, TextObject::Around, None)
      .map(|range| range.slice(doc.slice(..)).to_string())
  }

  #[test]
  fn nested_brackets() {
    assert_eq!(inside("foo(bar(baz)qux)", 9, 1).unwrap(), "baz");
    assert_eq!(inside("foo(bar(baz)qux)", 9, 2).unwrap(), "bar(baz)qux");
    assert_eq!(around("foo(bar(baz)qux)", 9, 1).unwrap(), "(baz)");
    assert_eq!(around("foo(bar(baz)qux)", 9, 2).unwrap(), "(bar(baz)qux)");
  }

  #[test]
  fn quotes() {
    let text = r#"say "hello" to 'world'"#;
    assert_eq!(inside(text, 6, 1).unwrap(), "hello");
    assert_eq!(around(text, 6, 1).unwrap(), r#""hello""#);
    assert_eq!(inside(text, 18, 1).unwrap(), "world");
  }

  #[test]
  fn escaped_quote() {
    assert_eq!(inside(r#"x = "a\"b";"#, 6, 1).unwrap(), r#"a\"b"#);
  }

  #[test]
  fn quote_inside_brackets() {
    let text = r#"f("abc", x)"#;
    assert_eq!(inside(text, 4, 1).unwrap(), "abc");
    assert_eq!(inside(text, 9, 1).unwrap(), r#""abc", x"#);
  }

  #[test]
  fn bracket_inside_quotes() {
    let text = r#"s = "a (b) c""#;
    assert_eq!(inside(text, 8, 1).unwrap(), "b");
    assert_eq!(inside(text, 5, 1).unwrap(), "a (b) c");
  }

  #[test]
  fn same_line_pair_beats_enclosing_block() {
    let text = "fn f() {\n    call(arg);\n}";
    assert_eq!(inside(text, 12, 1).unwrap(), "arg");
  }

  #[test]
  fn enclosing_block_across_lines() {
    let text = "fn f() {\n    x;\n}";
    assert_eq!(inside(text, 13, 1).unwrap(), "\n    x;\n");
  }

  #[test]
  fn empty_pair() {
    let doc = Rope::from("f()");
    let range = find_text_object(&doc, 1, 1, TextObject::Inside, None).unwrap();
    assert_eq!(range, Range::new(2, 2));
    assert!(range.is_empty());
  }

  #[test]
  fn zero_count_is_one() {
    assert_eq!(inside("(a)", 1, 0).unwrap(), "a");
  }

  #[test]
  fn errors() {
    assert_eq!(inside("", 0, 1), Err(Error::EmptyBuffer));
    assert_eq!(
      inside("plain text", 3, 1),
      Err(Error::NotFound(SearchError::SearchExhausted))
    );
    assert_eq!(inside("(a)", 1, 2), Err(Error::NotFound(SearchError::SearchExhausted)));
  }

  #[test]
  fn custom_pairs() {
    let doc = Rope::from("{x} [y]");
    let range = find_text_object(&doc, 1, 1, TextObject::Inside, Some("(:),{:}")).unwrap();
    assert_eq!(range, Range::new(1, 2));
    assert_eq!(
      find_text_object(&doc, 5, 1, TextObject::Inside, Some("(:),{:}")),
      Err(Error::NotFound(SearchError::SearchExhausted))
    );
    assert_eq!(
      find_text_object(&doc, 1, 1, TextObject::Inside, Some("(:(")),
      Err(Error::InvalidPairs(ParseError::SameOpenClose('(')))
    );
  }

  #[test]
  fn error_messages() {
    assert_eq!(
      Error::from(SearchError::SearchExhausted).to_string(),
      "can not find any pairs or quotes (no pair within the search window)"
    );
    assert_eq!(
      Error::from(ParseError::Incomplete).to_string(),
      "invalid value of pairs: list of pairs is incomplete"
    );
  }

  #[test]
  fn targets_from_config() {
    let config = Config::from_toml(
      r#"
      pairs = "[:]"
      quotes = "|"
      "#,
    )
    .unwrap();
    let targets = Targets::from_config(&config).unwrap();
    let doc = Rope::from("(a) [b] |c|");
    assert_eq!(targets.find(&doc, 1, 1, TextObject::Around), Ok(Range::new(4, 7)));
    assert_eq!(targets.find(&doc, 9, 1, TextObject::Inside), Ok(Range::new(9, 10)));
  }

  #[test]
  fn find_all_cursors() {
    let doc = Rope::from("(a) 'b'\nplain");
    let targets = Targets::default();
    let ranges = targets.find_all(&doc, &[1, 5, 10], 1, TextObject::Inside);
    assert_eq!(ranges.as_slice(), &[
      Ok(Range::new(1, 2)),
      Ok(Range::new(5, 6)),
      Err(Error::NotFound(SearchError::SearchExhausted)),
    ]);
  }

  fn valid(text: &str, pos: usize, count: u8, object: TextObject) -> bool {
    let doc = Rope::from(text);
    match find_text_object(&doc, pos, count as usize, object, None) {
      Ok(range) => range.start <= range.end && range.end <= doc.len_chars(),
      Err(Error::InvalidPairs(_)) => false,
      Err(_) => true,
    }
  }

  quickcheck::quickcheck! {
    fn test_ranges_are_valid(text: String, pos: usize, count: u8) -> bool {
      let len = text.chars().count();
      let pos = if len == 0 { 0 } else { pos % (len + 1) };
      valid(&text, pos, count, TextObject::Inside) && valid(&text, pos, count, TextObject::Around)
    }

    fn test_find_is_idempotent(text: String, pos: usize, count: u8) -> bool {
      let doc = Rope::from(text.as_str());
      let pos = pos % (doc.len_chars() + 1);
      let targets = Targets::default();
      let first = targets.find(&doc, pos, count as usize, TextObject::Around);
      let second = targets.find(&doc, pos, count as usize, TextObject::Around);
      first == second
    }
  }
}
