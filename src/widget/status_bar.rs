//! Status Bar Widget: Three-section status bar.
//!
//! Left shows the session state, center the live stats, right the key
//! help. Each section gets at most a third of the width.

use super::traits::Widget;
use crate::layout::Rect;
use crate::terminal::{OutputBuffer, Paint, Rgb, Style};
use unicode_width::UnicodeWidthChar;

/// Configuration for the status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBarConfig {
    /// Background color.
    pub bg: Rgb,
    /// Left section text color.
    pub left_fg: Rgb,
    /// Center section text color.
    pub center_fg: Rgb,
    /// Right section text color.
    pub right_fg: Rgb,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            bg: Rgb::new(40, 40, 40),
            left_fg: Rgb::WHITE,
            center_fg: Rgb::new(150, 150, 150),
            right_fg: Rgb::new(100, 200, 100),
        }
    }
}

/// A three-section status bar (left, center, right).
#[derive(Debug)]
pub struct StatusBar {
    /// Left section content.
    left: String,
    /// Center section content.
    center: String,
    /// Right section content.
    right: String,
    /// Widget bounds.
    bounds: Rect,
    /// Configuration.
    config: StatusBarConfig,
}

impl StatusBar {
    /// Create a new status bar with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, StatusBarConfig::default())
    }

    /// Create a new status bar with custom configuration.
    pub const fn with_config(bounds: Rect, config: StatusBarConfig) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            bounds,
            config,
        }
    }

    /// Set all sections at once.
    pub fn set_all(&mut self, left: impl Into<String>, center: impl Into<String>, right: impl Into<String>) {
        self.left = left.into();
        self.center = center.into();
        self.right = right.into();
    }

    /// Get the left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Get the center section content.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Get the right section content.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Write `text` clipped to `max` columns; returns the columns used.
    fn write_clipped(out: &mut OutputBuffer, text: &str, max: usize) -> usize {
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > max {
                break;
            }
            out.write_char(c);
            used += w;
        }
        used
    }

    /// Display width of `text` clipped to `max` columns.
    fn clipped_width(text: &str, max: usize) -> usize {
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > max {
                break;
            }
            used += w;
        }
        used
    }
}

impl Widget for StatusBar {
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
        let x = self.bounds.x;
        let y = self.bounds.y;
        let width = usize::from(self.bounds.width);
        let third = width / 3;

        // Clear the line with background
        out.cursor_move(x, y);
        out.set_paint(Paint::new(self.config.left_fg, self.config.bg));
        out.write_spaces(width);

        // Left section (left-aligned)
        out.cursor_move(x, y);
        out.set_paint(Paint::new(self.config.left_fg, self.config.bg).with_style(Style::BOLD));
        Self::write_clipped(out, &self.left, third);

        // Center section (centered)
        let center_len = Self::clipped_width(&self.center, third);
        #[allow(clippy::cast_possible_truncation)]
        let center_start = x + ((width - center_len) / 2) as u16;
        out.cursor_move(center_start, y);
        out.set_paint(Paint::new(self.config.center_fg, self.config.bg));
        Self::write_clipped(out, &self.center, third);

        // Right section (right-aligned)
        let right_len = Self::clipped_width(&self.right, third);
        #[allow(clippy::cast_possible_truncation)]
        let right_start = x + (width - right_len) as u16;
        out.cursor_move(right_start, y);
        out.set_paint(Paint::new(self.config.right_fg, self.config.bg));
        Self::write_clipped(out, &self.right, third);
    }
}
