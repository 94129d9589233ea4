use crate::line_ending::LineEnding;

/// The character that makes the following character literal inside quoted
/// text.
pub const ESCAPE_CHAR: char = '\\';

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

#[inline]
pub fn char_is_escape(ch: char) -> bool {
  ch == ESCAPE_CHAR
}
