//! Bracket pair search around and after the cursor.
//!
//! Two strategies are combined:
//!
//! - [`find_surround_pair`] walks outward from the cursor in both directions,
//!   skipping balanced pairs, until it reaches the `count`-th enclosing pair.
//!   The walk is bounded by a [`SearchWindow`].
//! - [`find_next_pair`] walks forward from the cursor on the cursor line only,
//!   skips to the `count`-th opening bracket and returns the pair it starts.
//!
//! [`find_pair_bounds`] prefers an enclosing pair that starts on the cursor
//! line, then a forward pair, then whatever the enclosing search returned.
//!
//! # Example
//!
//! ```
//! use ropey::Rope;
//! use the_targets::{Span, config::SearchLimits, pairs::DEFAULT_PAIRS};
//! use the_targets::surround::find_pair_bounds;
//!
//! let text = Rope::from("call(a, [b]) x");
//! let limits = SearchLimits::default();
//! assert_eq!(find_pair_bounds(&text, &DEFAULT_PAIRS, limits, 6, 1), Ok(Span::new(4, 11)));
//! // Not inside anything yet, so the next pair on the line is used.
//! assert_eq!(find_pair_bounds(&text, &DEFAULT_PAIRS, limits, 0, 1), Ok(Span::new(4, 11)));
//! ```

use smallvec::SmallVec;
use the_core::TextBuffer;

use crate::{
  SearchError,
  SearchResult,
  Span,
  config::SearchLimits,
  pairs::Pairs,
};

/// Offsets a search may visit, `left` inclusive and `right` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
  pub left:  usize,
  pub right: usize,
}

impl SearchWindow {
  /// Window for an enclosing-pair search from `pos`: at most `limits.offset`
  /// chars and `limits.lines` lines in each direction, whichever is tighter.
  pub fn around<T: TextBuffer + ?Sized>(text: &T, pos: usize, limits: SearchLimits) -> Self {
    let line = text.line_of(pos);
    let last_line = text.len_lines().saturating_sub(1);

    let left = pos
      .saturating_sub(limits.offset)
      .max(text.line_start(line.saturating_sub(limits.lines)));
    let right = pos
      .saturating_add(limits.offset)
      .min(text.len_chars())
      .min(text.line_end(line.saturating_add(limits.lines).min(last_line)));

    Self { left, right }
  }

  /// The line containing `pos`, without its line ending.
  pub fn line<T: TextBuffer + ?Sized>(text: &T, pos: usize) -> Self {
    let line = text.line_of(pos);
    Self {
      left:  text.line_start(line),
      right: text.line_end(line),
    }
  }
}

/// Finds the bracket pair for a `count`-level text object at `pos`.
///
/// An enclosing pair whose opening bracket is on the cursor line wins.
/// Otherwise a pair found by scanning forward on the cursor line is used,
/// and failing that the enclosing pair from further away (or its error).
pub fn find_pair_bounds<T: TextBuffer + ?Sized>(
  text: &T,
  pairs: &Pairs,
  limits: SearchLimits,
  pos: usize,
  count: usize,
) -> SearchResult<Span> {
  if text.is_empty() {
    return Err(SearchError::EmptyBuffer);
  }

  let surround = find_surround_pair(text, pairs, limits, pos, count);
  if let Ok(span) = surround
    && text.is_same_line(span.start, pos)
  {
    return surround;
  }

  match find_next_pair(text, pairs, pos, count) {
    Ok(span) => {
      tracing::trace!(?span, ?surround, "using next pair on the cursor line");
      Ok(span)
    },
    Err(_) => surround,
  }
}

/// Finds the `count`-th pair enclosing `pos`, searching outward.
///
/// When the cursor sits on a closing bracket that bracket belongs to the
/// first level; any other char under the cursor is treated as inside the
/// pair, so a cursor on an opening bracket selects the pair it opens.
pub fn find_surround_pair<T: TextBuffer + ?Sized>(
  text: &T,
  pairs: &Pairs,
  limits: SearchLimits,
  pos: usize,
  count: usize,
) -> SearchResult<Span> {
  if count == 0 {
    return Err(SearchError::SearchExhausted);
  }

  let window = SearchWindow::around(text, pos, limits);
  let (mut left, mut right) = if text.char_at(pos).is_some_and(|ch| pairs.is_close(ch)) {
    let Some(left) = pos.checked_sub(1) else {
      return Err(SearchError::SearchExhausted);
    };
    (left, pos)
  } else {
    (pos, pos + 1)
  };

  for level in 1..=count {
    let open = scan_left(text, pairs, &mut left, window.left)?;
    let close = scan_right(text, pairs, &mut right, window.right)?;
    if !pairs.is_pair(open, close) {
      tracing::trace!(left, right, %open, %close, "enclosing brackets do not match");
      return Err(SearchError::StructuralMismatch { pos: right });
    }

    if level < count {
      left = left.checked_sub(1).ok_or(SearchError::SearchExhausted)?;
      right += 1;
    }
  }

  Ok(Span::new(left, right))
}

/// Moves `left` down to the nearest unbalanced opening bracket, not below
/// `limit`.
fn scan_left<T: TextBuffer + ?Sized>(
  text: &T,
  pairs: &Pairs,
  left: &mut usize,
  limit: usize,
) -> SearchResult<char> {
  // Closing brackets seen so far, innermost last.
  let mut stack: SmallVec<[char; 8]> = SmallVec::new();

  while *left >= limit {
    if let Some(ch) = text.char_at(*left) {
      if pairs.is_open(ch) {
        let Some(&close) = stack.last() else {
          return Ok(ch);
        };
        if !pairs.is_pair(ch, close) {
          // e.g. `(] |`
          return Err(SearchError::StructuralMismatch { pos: *left });
        }
        stack.pop();
      } else if pairs.is_close(ch) {
        stack.push(ch);
      }
    }

    if *left == 0 {
      break;
    }
    *left -= 1;
  }

  Err(SearchError::SearchExhausted)
}

/// Moves `right` up to the nearest unbalanced closing bracket, staying below
/// `limit`.
fn scan_right<T: TextBuffer + ?Sized>(
  text: &T,
  pairs: &Pairs,
  right: &mut usize,
  limit: usize,
) -> SearchResult<char> {
  // Opening brackets seen so far, innermost last.
  let mut stack: SmallVec<[char; 8]> = SmallVec::new();

  while *right < limit {
    if let Some(ch) = text.char_at(*right) {
      if pairs.is_close(ch) {
        let Some(&open) = stack.last() else {
          return Ok(ch);
        };
        if !pairs.is_pair(open, ch) {
          // e.g. `| [)`
          return Err(SearchError::StructuralMismatch { pos: *right });
        }
        stack.pop();
      } else if pairs.is_open(ch) {
        stack.push(ch);
      }
    }
    *right += 1;
  }

  Err(SearchError::SearchExhausted)
}

/// Finds the pair opened by the `count`-th opening bracket at or after `pos`,
/// without leaving the cursor line.
pub fn find_next_pair<T: TextBuffer + ?Sized>(
  text: &T,
  pairs: &Pairs,
  pos: usize,
  count: usize,
) -> SearchResult<Span> {
  let window = SearchWindow::line(text, pos);
  let mut remaining = count;
  let mut base = None;
  let mut i = pos;

  while i < window.right && remaining > 0 {
    if text.char_at(i).is_some_and(|ch| pairs.is_open(ch)) {
      remaining -= 1;
      if remaining == 0 {
        base = Some(i);
      }
    }
    i += 1;
  }
  let Some(base) = base else {
    return Err(SearchError::SearchExhausted);
  };

  // Offsets of the opening brackets that are still open, innermost last.
  let mut stack: SmallVec<[usize; 8]> = SmallVec::new();
  stack.push(base);

  while i < window.right {
    let Some(ch) = text.char_at(i) else {
      break;
    };
    if pairs.is_open(ch) {
      stack.push(i);
    } else if pairs.is_close(ch) {
      let Some(&open_pos) = stack.last() else {
        break;
      };
      if !text.char_at(open_pos).is_some_and(|open| pairs.is_pair(open, ch)) {
        return Err(SearchError::StructuralMismatch { pos: i });
      }
      stack.pop();
      if stack.is_empty() {
        return Ok(Span::new(open_pos, i));
      }
    }
    i += 1;
  }

  Err(SearchError::SearchExhausted)
}
