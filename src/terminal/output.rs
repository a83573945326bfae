//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use super::style::{Paint, Rgb, Style};
use std::fmt::Write as _;
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A whole frame is accumulated here, then flushed in a single `write()`
/// syscall to prevent terminal flickering.
pub struct OutputBuffer {
    data: String,
    /// Paint currently active on the terminal, to skip redundant SGRs.
    active: Option<Paint>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: String::with_capacity(capacity),
            active: None,
        }
    }

    /// Create a buffer sized for a typical terminal frame (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.active = None;
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Get the buffer contents as text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Write a single character.
    #[inline]
    pub fn write_char(&mut self, c: char) {
        self.data.push(c);
    }

    /// Write `count` spaces.
    pub fn write_spaces(&mut self, count: usize) {
        self.data.extend(std::iter::repeat_n(' ', count));
    }

    /// Move cursor to (x, y) position (0-indexed; ANSI is 1-indexed).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.push_str("\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.push_str("\x1b[?25h");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Enable style attributes.
    pub fn set_style(&mut self, style: Style) {
        for code in style.sgr_codes() {
            let _ = write!(self.data, "\x1b[{code}m");
        }
    }

    /// Switch to a paint, emitting only what changed.
    pub fn set_paint(&mut self, paint: Paint) {
        if self.active == Some(paint) {
            return;
        }
        // Styles cannot be switched off individually without extra codes,
        // so any style change goes through a reset.
        let reset = self.active.is_none_or(|active| active.style != paint.style);
        if reset {
            self.reset_attrs();
            self.set_style(paint.style);
            self.set_fg(paint.fg);
            self.set_bg(paint.bg);
        } else if let Some(active) = self.active {
            if active.fg != paint.fg {
                self.set_fg(paint.fg);
            }
            if active.bg != paint.bg {
                self.set_bg(paint.bg);
            }
        }
        self.active = Some(paint);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.push_str("\x1b[0m");
        self.active = None;
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.push_str("\x1b[2J");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.data.as_bytes())?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_based() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        out.cursor_move(9, 4);
        assert_eq!(out.as_str(), "\x1b[1;1H\x1b[5;10H");
    }

    #[test]
    fn test_paint_is_deduplicated() {
        let mut out = OutputBuffer::new();
        let paint = Paint::new(Rgb::WHITE, Rgb::BLACK);
        out.set_paint(paint);
        let len = out.len();
        out.set_paint(paint);
        assert_eq!(out.len(), len);

        out.set_paint(Paint::new(Rgb::new(1, 2, 3), Rgb::BLACK));
        assert!(out.as_str().ends_with("\x1b[38;2;1;2;3m"));
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::new();
        out.write_str("hello");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hello");
    }
}
