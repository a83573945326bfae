//! Practice Surface: In-memory text buffer for the terminal host.
//!
//! Lines are split once on load and keep a table of grapheme boundaries,
//! so column lookups during typing are O(1) slices instead of rescans.

use super::decoration::Decoration;
use super::position::Position;
use super::traits::TextSurface;
use crate::validator::Verdict;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// A line stored in the practice buffer.
#[derive(Debug, Clone)]
struct Line {
    /// Line text without its terminator.
    text: String,
    /// Byte offset of each grapheme start, followed by `text.len()`.
    bounds: Vec<usize>,
}

impl Line {
    fn new(text: &str) -> Self {
        let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self {
            text: text.to_string(),
            bounds,
        }
    }

    /// Number of graphemes in this line.
    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Grapheme at a 1-based column.
    fn grapheme(&self, column: usize) -> Option<&str> {
        let start = *self.bounds.get(column.checked_sub(1)?)?;
        let end = *self.bounds.get(column)?;
        Some(&self.text[start..end])
    }
}

/// The buffer a practice session is typed against.
#[derive(Debug, Clone)]
pub struct PracticeSurface {
    /// Lines of the buffer (never empty).
    lines: Vec<Line>,
    /// Caret position.
    cursor: Position,
    /// Correctness markup keyed by the decorated position.
    decorations: HashMap<Position, Verdict>,
    /// Whether the buffer rejects input.
    read_only: bool,
    /// Whether the surface has input focus.
    focused: bool,
    /// Needs redraw flag.
    dirty: bool,
}

impl PracticeSurface {
    /// Create a surface holding `text`, caret at the origin.
    pub fn new(text: &str) -> Self {
        Self {
            lines: split_lines(text),
            cursor: Position::ORIGIN,
            decorations: HashMap::new(),
            read_only: false,
            focused: false,
            dirty: true,
        }
    }

    /// Replace the whole buffer, as a full-buffer paste does.
    ///
    /// Decorations are dropped and the caret returns to the origin. The
    /// read-only flag is left alone; unlocking is the lifecycle's job.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.cursor = Position::ORIGIN;
        self.decorations.clear();
        self.dirty = true;
    }

    /// The buffer content with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total number of graphemes, excluding line terminators.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Iterate over `(line_number, text)` pairs starting at `first`.
    pub fn lines_from(&self, first: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(first.saturating_sub(1))
            .map(|(i, line)| (i + 1, line.text.as_str()))
    }

    /// Iterate over the graphemes of a line with their columns.
    pub fn graphemes(&self, line: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .get(line.wrapping_sub(1))
            .into_iter()
            .flat_map(|l| {
                l.bounds
                    .windows(2)
                    .enumerate()
                    .map(move |(i, w)| (i + 1, &l.text[w[0]..w[1]]))
            })
    }

    /// Verdict decorating a position, if any.
    pub fn decoration_at(&self, position: Position) -> Option<Verdict> {
        self.decorations.get(&position).copied()
    }

    /// Number of decorated positions.
    pub fn decoration_count(&self) -> usize {
        self.decorations.len()
    }

    /// Check if focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set focus state.
    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.dirty = true;
    }

    /// Check if this surface needs to be redrawn.
    pub const fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the redraw flag after rendering.
    pub const fn clear_redraw(&mut self) {
        self.dirty = false;
    }

    fn line(&self, line: usize) -> Option<&Line> {
        self.lines.get(line.checked_sub(1)?)
    }
}

impl Default for PracticeSurface {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextSurface for PracticeSurface {
    fn position(&self) -> Position {
        self.cursor
    }

    fn set_position(&mut self, position: Position) {
        let line = position.line.clamp(1, self.lines.len());
        let max_column = self.line_length(line).unwrap_or(0) + 1;
        self.cursor = Position::new(line, position.column.clamp(1, max_column));
        self.dirty = true;
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_content(&self, line: usize) -> Option<&str> {
        self.line(line).map(|l| l.text.as_str())
    }

    fn line_length(&self, line: usize) -> Option<usize> {
        self.line(line).map(Line::len)
    }

    fn grapheme(&self, position: Position) -> Option<&str> {
        self.line(position.line)?.grapheme(position.column)
    }

    fn decorate(&mut self, decoration: Decoration) {
        self.decorations
            .insert(decoration.range.start, decoration.verdict);
        self.dirty = true;
    }

    fn clear_decorations(&mut self) {
        self.decorations.clear();
        self.dirty = true;
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        self.dirty = true;
    }

    fn focus(&mut self) {
        self.set_focused(true);
    }
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
fn split_lines(text: &str) -> Vec<Line> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split('\n').map(Line::new).collect()
}
