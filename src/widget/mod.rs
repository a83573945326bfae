//! Widgets: The editor view and the status bar.
//!
//! Widgets render straight into an [`OutputBuffer`](crate::terminal::OutputBuffer)
//! with absolute cursor moves, so a frame is one contiguous write.

mod editor_view;
mod status_bar;
mod traits;

pub use editor_view::EditorView;
pub use status_bar::{StatusBar, StatusBarConfig};
pub use traits::Widget;
