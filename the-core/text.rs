//! Read-only access to the host editor's text.
//!
//! Text-object searches never mutate the document; they only need random
//! access to characters and a way to map offsets to lines and back. The
//! [`TextBuffer`] trait captures exactly that, so the searches can run on a
//! [`Rope`], a [`RopeSlice`] or any other snapshot the host provides.
//!
//! All offsets are char indices.

use ropey::{
  Rope,
  RopeSlice,
};

use crate::line_ending::line_end_char_index;

pub trait TextBuffer {
  /// Total number of chars in the buffer.
  fn len_chars(&self) -> usize;

  /// The char at `pos`, or `None` when `pos` is past the end.
  fn char_at(&self, pos: usize) -> Option<char>;

  /// Line containing `pos`. Offsets past the end map to the last line.
  fn line_of(&self, pos: usize) -> usize;

  /// Offset of the first char of `line`.
  fn line_start(&self, line: usize) -> usize;

  /// Offset one past the last char of `line`, excluding its line ending.
  fn line_end(&self, line: usize) -> usize;

  fn len_lines(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len_chars() == 0
  }

  fn is_same_line(&self, a: usize, b: usize) -> bool {
    self.line_of(a) == self.line_of(b)
  }
}

impl TextBuffer for RopeSlice<'_> {
  fn len_chars(&self) -> usize {
    RopeSlice::len_chars(self)
  }

  fn char_at(&self, pos: usize) -> Option<char> {
    self.get_char(pos)
  }

  fn line_of(&self, pos: usize) -> usize {
    self.char_to_line(pos.min(RopeSlice::len_chars(self)))
  }

  fn line_start(&self, line: usize) -> usize {
    self.line_to_char(line.min(self.len_lines().saturating_sub(1)))
  }

  fn line_end(&self, line: usize) -> usize {
    line_end_char_index(self, line.min(self.len_lines().saturating_sub(1)))
  }

  fn len_lines(&self) -> usize {
    RopeSlice::len_lines(self)
  }
}

impl TextBuffer for Rope {
  fn len_chars(&self) -> usize {
    Rope::len_chars(self)
  }

  fn char_at(&self, pos: usize) -> Option<char> {
    self.get_char(pos)
  }

  fn line_of(&self, pos: usize) -> usize {
    self.slice(..).line_of(pos)
  }

  fn line_start(&self, line: usize) -> usize {
    self.slice(..).line_start(line)
  }

  fn line_end(&self, line: usize) -> usize {
    self.slice(..).line_end(line)
  }

  fn len_lines(&self) -> usize {
    Rope::len_lines(self)
  }
}
