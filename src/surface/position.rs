//! Position: 1-based caret coordinates.

use std::fmt;

/// A caret location in the buffer.
///
/// Both coordinates are 1-based. Column 1 is before the first character of
/// a line; column `len + 1` is the end of the line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl Position {
    /// The first character of the buffer.
    pub const ORIGIN: Self = Self::new(1, 1);

    /// Create a new position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Check if this is the very first caret location.
    #[inline]
    pub const fn is_origin(&self) -> bool {
        self.line == 1 && self.column == 1
    }

    /// The position one column to the right on the same line.
    #[inline]
    #[must_use]
    pub const fn next_column(&self) -> Self {
        Self::new(self.line, self.column + 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` within a single line.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// First covered position.
    pub start: Position,
    /// First position past the range.
    pub end: Position,
}

impl Range {
    /// The one-character range starting at `position`.
    #[inline]
    pub const fn single(position: Position) -> Self {
        Self {
            start: position,
            end: position.next_column(),
        }
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 5) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 2));
        assert!(Position::ORIGIN.is_origin());
        assert!(!Position::new(1, 2).is_origin());
    }

    #[test]
    fn test_single_range() {
        let range = Range::single(Position::new(3, 4));
        assert_eq!(range.end, Position::new(3, 5));
        assert_eq!(range.start, Position::new(3, 4));
    }
}
