//! Layout module: Screen regions for the editor and status bar.
//!
//! Layouts are computed once per frame from the terminal size; there is
//! no tree traversal, just a fixed split.

mod rect;

pub use rect::{Rect, ScreenLayout};
