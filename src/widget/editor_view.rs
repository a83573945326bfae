//! Editor View: Renders the practice surface with correctness colouring.
//!
//! Each row is a line number gutter followed by the line's graphemes,
//! painted pending/correct/incorrect from the surface decorations. Lines
//! longer than the view are clipped; the view scrolls vertically to keep
//! the caret line visible.

use super::traits::Widget;
use crate::config::Theme;
use crate::layout::Rect;
use crate::surface::{PracticeSurface, Position, TextSurface};
use crate::terminal::{OutputBuffer, Paint};
use crate::validator::Verdict;
use unicode_width::UnicodeWidthStr;

/// Marker drawn for a wrong key typed at the end of a line.
const EOL_MARKER: char = '↵';

/// A read-only view of a [`PracticeSurface`].
pub struct EditorView<'a> {
    surface: &'a PracticeSurface,
    theme: &'a Theme,
    bounds: Rect,
    /// First visible line (1-based).
    scroll_top: usize,
    tab_width: usize,
}

impl<'a> EditorView<'a> {
    /// Create a view over `surface`.
    pub const fn new(surface: &'a PracticeSurface, theme: &'a Theme, bounds: Rect) -> Self {
        Self {
            surface,
            theme,
            bounds,
            scroll_top: 1,
            tab_width: 4,
        }
    }

    /// Builder: first visible line.
    #[must_use]
    pub const fn with_scroll(mut self, scroll_top: usize) -> Self {
        self.scroll_top = if scroll_top == 0 { 1 } else { scroll_top };
        self
    }

    /// Builder: tab expansion width.
    #[must_use]
    pub const fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Scroll offset that keeps `cursor_line` visible in `height` rows.
    pub const fn follow(scroll_top: usize, cursor_line: usize, height: usize) -> usize {
        let height = if height == 0 { 1 } else { height };
        let top = if scroll_top == 0 { 1 } else { scroll_top };
        if cursor_line < top {
            cursor_line
        } else if cursor_line >= top + height {
            cursor_line + 1 - height
        } else {
            top
        }
    }

    /// Width of the line number gutter, including one space of padding.
    fn gutter_width(&self) -> usize {
        let digits = self.surface.line_count().max(1).ilog10() as usize + 1;
        digits.max(3) + 1
    }

    /// Screen columns a grapheme occupies.
    fn grapheme_width(&self, grapheme: &str) -> usize {
        if grapheme == "\t" {
            self.tab_width
        } else if grapheme.chars().any(char::is_control) {
            1
        } else {
            grapheme.width()
        }
    }

    fn paint_for(&self, position: Position) -> Paint {
        match self.surface.decoration_at(position) {
            Some(Verdict::Correct) => self.theme.correct_paint(),
            Some(Verdict::Incorrect) => self.theme.incorrect_paint(),
            None => self.theme.pending_paint(),
        }
    }

    /// Screen coordinates of the caret, or `None` if it is hidden or
    /// scrolled out of view.
    pub fn caret(&self) -> Option<(u16, u16)> {
        if self.surface.is_read_only() || self.bounds.is_empty() {
            return None;
        }
        let cursor = self.surface.position();
        let row = cursor.line.checked_sub(self.scroll_top)?;
        if row >= usize::from(self.bounds.height) {
            return None;
        }
        let offset: usize = self
            .surface
            .graphemes(cursor.line)
            .take_while(|(column, _)| *column < cursor.column)
            .map(|(_, g)| self.grapheme_width(g))
            .sum();
        let x = self.gutter_width() + offset;
        if x >= usize::from(self.bounds.width) {
            return None;
        }
        let x = u16::try_from(x).ok()?;
        let row = u16::try_from(row).ok()?;
        Some((self.bounds.x + x, self.bounds.y + row))
    }

    fn render_line(&self, out: &mut OutputBuffer, line: usize, text_width: usize) {
        let mut used = 0;
        let mut clipped = false;
        for (column, grapheme) in self.surface.graphemes(line) {
            let width = self.grapheme_width(grapheme);
            if used + width > text_width {
                clipped = true;
                break;
            }
            out.set_paint(self.paint_for(Position::new(line, column)));
            if grapheme == "\t" || grapheme.chars().any(char::is_control) {
                out.write_spaces(width);
            } else {
                out.write_str(grapheme);
            }
            used += width;
        }

        let end_of_line = Position::new(line, self.surface.line_length(line).unwrap_or(0) + 1);
        if !clipped
            && used < text_width
            && self.surface.decoration_at(end_of_line) == Some(Verdict::Incorrect)
        {
            out.set_paint(self.theme.incorrect_paint());
            out.write_char(EOL_MARKER);
            used += 1;
        }

        out.set_paint(self.theme.pending_paint());
        out.write_spaces(text_width.saturating_sub(used));
    }
}

impl Widget for EditorView<'_> {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn render(&self, out: &mut OutputBuffer) {
        if self.bounds.is_empty() {
            return;
        }
        let width = usize::from(self.bounds.width);
        let gutter = self.gutter_width().min(width);
        let text_width = width - gutter;
        let caret_line = self.surface.position().line;

        let mut lines = self.surface.lines_from(self.scroll_top).map(|(n, _)| n);
        for row in 0..self.bounds.height {
            out.cursor_move(self.bounds.x, self.bounds.y + row);
            match lines.next() {
                Some(line) => {
                    out.set_paint(self.theme.gutter_paint(line == caret_line));
                    let number = format!("{line:>w$} ", w = gutter.saturating_sub(1));
                    out.write_str(&number[..gutter.min(number.len())]);
                    self.render_line(out, line, text_width);
                }
                None => {
                    out.set_paint(self.theme.pending_paint());
                    out.write_spaces(width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyEvent;
    use crate::validator::KeystrokeValidator;

    fn screen(view: &EditorView<'_>, rows: u16, cols: u16) -> vt100::Parser {
        let mut out = OutputBuffer::new();
        view.render(&mut out);
        let mut parser = vt100::Parser::new(rows, cols, 0);
        parser.process(out.as_bytes());
        parser
    }

    #[test]
    fn test_follow_keeps_cursor_visible() {
        assert_eq!(EditorView::follow(1, 3, 10), 1);
        assert_eq!(EditorView::follow(1, 12, 10), 3);
        assert_eq!(EditorView::follow(5, 2, 10), 2);
        assert_eq!(EditorView::follow(0, 1, 0), 1);
    }

    #[test]
    fn test_renders_gutter_and_text() {
        let surface = PracticeSurface::new("let a = 1;\nlet b = 2;");
        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 30, 3));
        let parser = screen(&view, 3, 30);

        let rows: Vec<String> = parser.screen().rows(0, 30).collect();
        assert_eq!(rows[0].trim_end(), "  1 let a = 1;");
        assert_eq!(rows[1].trim_end(), "  2 let b = 2;");
        assert_eq!(rows[2].trim_end(), "");
    }

    #[test]
    fn test_decorations_colour_cells() {
        let mut surface = PracticeSurface::new("ab");
        let validator = KeystrokeValidator::new();
        validator.handle_key_event(&KeyEvent::char('a'), &mut surface);
        validator.handle_key_event(&KeyEvent::char('z'), &mut surface);

        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 20, 1));
        let parser = screen(&view, 1, 20);
        let cell_a = parser.screen().cell(0, 4).unwrap();
        let cell_b = parser.screen().cell(0, 5).unwrap();

        let rgb = |c: crate::terminal::Rgb| vt100::Color::Rgb(c.r, c.g, c.b);
        assert_eq!(cell_a.contents(), "a");
        assert_eq!(cell_a.fgcolor(), rgb(theme.correct));
        assert_eq!(cell_b.fgcolor(), rgb(theme.incorrect));
        assert_eq!(cell_b.bgcolor(), rgb(theme.incorrect_bg));
        assert!(cell_b.bold());
    }

    #[test]
    fn test_tabs_expand_and_caret_follows() {
        let mut surface = PracticeSurface::new("x\n\ty");
        surface.set_position(Position::new(2, 2));
        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 20, 2)).with_tab_width(4);

        let parser = screen(&view, 2, 20);
        let rows: Vec<String> = parser.screen().rows(0, 20).collect();
        assert_eq!(rows[1].trim_end(), "  2     y");
        assert_eq!(view.caret(), Some((8, 1)));
    }

    #[test]
    fn test_caret_hidden_when_read_only_or_scrolled() {
        let mut surface = PracticeSurface::new("a\nb\nc");
        surface.set_position(Position::new(3, 1));
        let theme = Theme::default();

        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 20, 2));
        assert_eq!(view.caret(), None);
        let view = view.with_scroll(2);
        assert_eq!(view.caret(), Some((4, 1)));

        surface.set_read_only(true);
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 20, 3));
        assert_eq!(view.caret(), None);
    }

    #[test]
    fn test_wrong_key_at_line_end_draws_marker() {
        let mut surface = PracticeSurface::new("ab\ncd");
        let validator = KeystrokeValidator::new();
        for c in ['a', 'b', 'x'] {
            validator.handle_key_event(&KeyEvent::char(c), &mut surface);
        }
        assert_eq!(surface.decoration_at(Position::new(1, 3)), Some(Verdict::Incorrect));

        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 20, 2));
        let parser = screen(&view, 2, 20);
        let rows: Vec<String> = parser.screen().rows(0, 20).collect();
        assert_eq!(rows[0].trim_end(), "  1 ab↵");
    }

    #[test]
    fn test_clipped_line_has_no_end_marker() {
        // The wide character does not fit, leaving one free cell
        let mut surface = PracticeSurface::new("abcdef日xyz");
        surface.set_position(Position::new(1, 7));
        KeystrokeValidator::new().handle_key_event(&KeyEvent::char('z'), &mut surface);
        assert_eq!(surface.decoration_at(Position::new(1, 7)), Some(Verdict::Incorrect));

        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 11, 1));
        let parser = screen(&view, 1, 11);
        let rows: Vec<String> = parser.screen().rows(0, 11).collect();
        assert_eq!(rows[0].trim_end(), "  1 abcdef");
        assert!(!rows[0].contains('↵'));
    }

    #[test]
    fn test_long_lines_are_clipped() {
        let surface = PracticeSurface::new("abcdefghijklmnopqrstuvwxyz");
        let theme = Theme::default();
        let view = EditorView::new(&surface, &theme, Rect::new(0, 0, 10, 1));
        let parser = screen(&view, 1, 10);
        let rows: Vec<String> = parser.screen().rows(0, 10).collect();
        assert_eq!(rows[0], "  1 abcdef");
    }
}
