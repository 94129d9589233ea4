//! Choosing between a bracket pair and a quote pair.

use the_core::TextBuffer;

use crate::{
  SearchResult,
  Span,
};

/// Picks the candidate closest to `pos`.
///
/// A found candidate always beats a failed one; when both failed the bracket
/// error is kept. Between two found candidates, one starting on the cursor
/// line beats one that does not, then the one whose nearer delimiter is
/// closer to `pos` wins. Ties go to the bracket pair.
pub fn select_nearest<T: TextBuffer + ?Sized>(
  text: &T,
  pos: usize,
  bracket: SearchResult<Span>,
  quote: SearchResult<Span>,
) -> SearchResult<Span> {
  let (bracket_span, quote_span) = match (bracket, quote) {
    (bracket, Err(_)) => return bracket,
    (Err(_), quote) => return quote,
    (Ok(bracket), Ok(quote)) => (bracket, quote),
  };

  let bracket_on_line = text.is_same_line(bracket_span.start, pos);
  let quote_on_line = text.is_same_line(quote_span.start, pos);
  let winner = match (bracket_on_line, quote_on_line) {
    (true, false) => bracket_span,
    (false, true) => quote_span,
    _ if quote_span.distance_to(pos) < bracket_span.distance_to(pos) => quote_span,
    _ => bracket_span,
  };
  Ok(winner)
}
