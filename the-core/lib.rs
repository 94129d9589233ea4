pub mod chars;
pub mod line_ending;
pub mod text;

pub use text::TextBuffer;
