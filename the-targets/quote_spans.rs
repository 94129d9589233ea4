//! Quote pairs on the cursor line.
//!
//! Quotes can not be matched by direction the way brackets can, so the
//! cursor line is scanned once from its start and every quote char is paired
//! with the most recent pending quote of the same kind. A quote right after a
//! backslash is literal. Quotes left pending at the end of the line are
//! dropped.

use smallvec::SmallVec;
use the_core::{
  TextBuffer,
  chars::char_is_escape,
};

use crate::{
  SearchError,
  SearchResult,
  Span,
  quotes::Quotes,
  surround::SearchWindow,
};

/// Two matching quote chars and the quote they are made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSpan {
  pub start: usize,
  pub end:   usize,
  pub quote: char,
}

impl QuoteSpan {
  pub const fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }

  fn encloses(&self, pos: usize) -> bool {
    self.start <= pos && self.end >= pos
  }
}

/// Every matched quote pair on the line of `pos`, ordered by start offset.
pub fn line_quote_spans<T: TextBuffer + ?Sized>(
  text: &T,
  quotes: &Quotes,
  pos: usize,
) -> Vec<QuoteSpan> {
  let window = SearchWindow::line(text, pos);
  let mut spans = Vec::new();
  let mut pending: SmallVec<[(usize, char); 8]> = SmallVec::new();
  let mut escaped = false;

  for i in window.left..window.right {
    let Some(ch) = text.char_at(i) else {
      break;
    };
    if !escaped && quotes.is_quote(ch) {
      match pending.last() {
        Some(&(start, quote)) if quote == ch => {
          pending.pop();
          spans.push(QuoteSpan {
            start,
            end: i,
            quote,
          });
        },
        _ => pending.push((i, ch)),
      }
    } else {
      escaped = char_is_escape(ch);
    }
  }

  spans.sort_by_key(|span| span.start);
  spans
}

/// Finds the quote pair for a `count`-level text object at `pos`.
///
/// Pairs around the cursor are preferred: the `count`-th innermost one wins.
/// Without enough of those, the pairs starting at or after the cursor are
/// considered instead, taking the `count`-th one counted back from the end
/// of the line.
pub fn find_quote_bounds<T: TextBuffer + ?Sized>(
  text: &T,
  quotes: &Quotes,
  pos: usize,
  count: usize,
) -> SearchResult<QuoteSpan> {
  if text.is_empty() {
    return Err(SearchError::EmptyBuffer);
  }

  let spans = line_quote_spans(text, quotes, pos);
  let surrounding = nth_last(
    spans
      .iter()
      .take_while(|span| span.start <= pos)
      .filter(|span| span.encloses(pos)),
    count,
  );
  let following = || nth_last(spans.iter().filter(|span| span.start >= pos), count);

  let found = surrounding.or_else(following).copied();
  tracing::trace!(?found, spans = spans.len(), "quote search");
  found.ok_or(SearchError::SearchExhausted)
}

/// The first of the last `count` items, if there are at least `count`.
fn nth_last<'a>(
  spans: impl Iterator<Item = &'a QuoteSpan>,
  count: usize,
) -> Option<&'a QuoteSpan> {
  if count == 0 {
    return None;
  }
  let matches: SmallVec<[&QuoteSpan; 8]> = spans.collect();
  let idx = matches.len().checked_sub(count)?;
  Some(matches[idx])
}
