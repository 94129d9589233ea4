//! Pair and quote text objects.
//!
//! Given a document, a cursor and a count, these modules find the nearest
//! bracket pair or quote pair around (or after) the cursor, the way modal
//! editors select `i(` / `a"` style objects without naming the delimiter:
//!
//! - [`pairs`] / [`quotes`] describe which characters delimit objects.
//! - [`surround`] finds enclosing and forward bracket pairs.
//! - [`quote_spans`] pairs up quotes on the cursor line.
//! - [`select`] picks between a bracket candidate and a quote candidate.
//! - [`textobject`] turns the winner into an inner or outer [`Range`].
//!
//! Every search is a bounded, read-only scan; nothing is cached between
//! calls.
//!
//! # Example
//!
//! ```
//! use ropey::Rope;
//! use the_targets::{TextObject, find_text_object};
//!
//! let text = Rope::from("foo(bar(baz)qux)");
//! let range = find_text_object(&text, 9, 1, TextObject::Inside, None).unwrap();
//! assert_eq!(range.slice(text.slice(..)), "baz");
//!
//! let range = find_text_object(&text, 9, 2, TextObject::Inside, None).unwrap();
//! assert_eq!(range.slice(text.slice(..)), "bar(baz)qux");
//! ```

use thiserror::Error;

pub mod config;
pub mod pairs;
pub mod quote_spans;
pub mod quotes;
pub mod select;
pub mod surround;
pub mod textobject;

pub use textobject::{
  Range,
  Targets,
  TextObject,
  find_text_object,
};

/// Offsets of an opening and a closing delimiter, both inclusive.
///
/// This is the raw match; [`textobject`] decides whether the delimiters
/// themselves end up in the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl Span {
  pub const fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  /// Distance from `pos` to whichever delimiter is closer.
  pub const fn distance_to(&self, pos: usize) -> usize {
    let left = pos.abs_diff(self.start);
    let right = self.end.abs_diff(pos);
    if left < right { left } else { right }
  }
}

impl From<(usize, usize)> for Span {
  fn from((start, end): (usize, usize)) -> Self {
    Self::new(start, end)
  }
}

/// Why a single search attempt came back empty.
///
/// These stay local to a search; callers fall back to another strategy and
/// only the text-object layer reports them.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SearchError {
  #[error("empty document")]
  EmptyBuffer,
  #[error("mismatched pair at {pos}")]
  StructuralMismatch { pos: usize },
  #[error("no pair within the search window")]
  SearchExhausted,
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
