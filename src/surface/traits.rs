//! `TextSurface` trait: What the validator needs from an editor.

use super::decoration::Decoration;
use super::position::Position;
use super::SurfaceError;
use unicode_segmentation::UnicodeSegmentation;

/// The character expected at a caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedChar<'a> {
    /// A single grapheme cluster from the buffer.
    Char(&'a str),
    /// The caret sits past the last character of its line.
    EndOfLine,
}

impl ExpectedChar<'_> {
    /// Check if a produced character matches this expectation.
    ///
    /// `EndOfLine` never matches; line ends are crossed with Enter.
    pub fn matches(&self, produced: char) -> bool {
        match self {
            Self::Char(grapheme) => {
                let mut buf = [0u8; 4];
                *grapheme == produced.encode_utf8(&mut buf)
            }
            Self::EndOfLine => false,
        }
    }

    /// Check if this is the end-of-line sentinel.
    pub const fn is_end_of_line(&self) -> bool {
        matches!(self, Self::EndOfLine)
    }
}

/// An editor buffer driven by the keystroke validator.
///
/// Lines and columns are 1-based. Implementors own their text storage and
/// rendering; the validator only queries positions and issues the directed
/// operations below.
pub trait TextSurface {
    /// Current caret position.
    fn position(&self) -> Position;

    /// Move the caret.
    ///
    /// Implementations clamp out-of-range positions into the buffer.
    fn set_position(&mut self, position: Position);

    /// Number of lines (an empty buffer still has one empty line).
    fn line_count(&self) -> usize;

    /// Text of a line, without its terminator.
    fn line_content(&self, line: usize) -> Option<&str>;

    /// Number of columns on a line.
    fn line_length(&self, line: usize) -> Option<usize>;

    /// The grapheme under a caret position, if any.
    fn grapheme(&self, position: Position) -> Option<&str>;

    /// Apply a correctness decoration.
    fn decorate(&mut self, decoration: Decoration);

    /// Remove every decoration.
    fn clear_decorations(&mut self);

    /// Whether the buffer currently rejects input.
    fn is_read_only(&self) -> bool;

    /// Lock or unlock the buffer.
    fn set_read_only(&mut self, read_only: bool);

    /// Request input focus.
    fn focus(&mut self);

    /// End of the full buffer range: last line, one past its last column.
    fn end_position(&self) -> Position {
        let last = self.line_count().max(1);
        let len = self.line_length(last).unwrap_or(0);
        Position::new(last, len + 1)
    }

    /// Whether the buffer holds no characters.
    fn is_empty(&self) -> bool {
        self.line_count() <= 1 && self.line_length(1).unwrap_or(0) == 0
    }

    /// Number of leading whitespace columns on a line.
    fn indentation(&self, line: usize) -> usize {
        self.line_content(line).map_or(0, |text| {
            text.graphemes(true)
                .take_while(|g| g.chars().all(char::is_whitespace))
                .count()
        })
    }

    /// The character the user must type at `position`.
    fn expected_at(&self, position: Position) -> Result<ExpectedChar<'_>, SurfaceError> {
        if self.is_empty() {
            return Err(SurfaceError::EmptyBuffer);
        }
        if position.column == 0 {
            return Err(SurfaceError::MalformedPosition(position));
        }
        let len = self
            .line_length(position.line)
            .ok_or(SurfaceError::MalformedPosition(position))?;

        if position.column == len + 1 {
            return Ok(ExpectedChar::EndOfLine);
        }
        self.grapheme(position)
            .map(ExpectedChar::Char)
            .ok_or(SurfaceError::MalformedPosition(position))
    }
}
