//! Rect: A rectangle primitive for layout calculations.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a terminal size (full screen).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Split vertically at a given row offset.
    pub fn split_vertical(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.height);
        (
            Self::new(self.x, self.y, self.width, at),
            Self::new(self.x, self.y + at, self.width, self.height - at),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// The trainer screen: editor on top, one status row at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Practice text area.
    pub editor: Rect,
    /// Status bar row.
    pub status: Rect,
}

impl ScreenLayout {
    /// Compute the layout for a terminal size.
    pub fn compute(width: u16, height: u16) -> Self {
        let screen = Rect::from_size(width, height);
        let (editor, status) = screen.split_vertical(height.saturating_sub(1));
        Self { editor, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_vertical() {
        let (top, bottom) = Rect::new(0, 0, 80, 24).split_vertical(20);
        assert_eq!(top, Rect::new(0, 0, 80, 20));
        assert_eq!(bottom, Rect::new(0, 20, 80, 4));
    }

    #[test]
    fn test_screen_layout() {
        let layout = ScreenLayout::compute(80, 24);
        assert_eq!(layout.editor, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));

        let tiny = ScreenLayout::compute(10, 0);
        assert!(tiny.editor.is_empty());
        assert!(tiny.status.is_empty());
    }
}
