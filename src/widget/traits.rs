//! Widget trait.
//!
//! This module defines the core `Widget` trait implemented by the editor
//! view and the status bar.

use crate::layout::Rect;
use crate::terminal::OutputBuffer;

/// A UI component that renders itself into a frame.
///
/// Widgets only draw; keystrokes go to the validator, never to a widget.
pub trait Widget {
    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Set the bounds of this widget.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Render this widget into the frame.
    ///
    /// The widget should only write to cells within its bounds.
    fn render(&self, out: &mut OutputBuffer);
}
