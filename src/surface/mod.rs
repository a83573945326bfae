//! Surface module: The editor buffer the keystroke validator drives.
//!
//! This module contains:
//! - [`TextSurface`]: The capability the validator needs from an editor
//! - [`PracticeSurface`]: In-memory implementation rendered by the terminal host
//! - [`Position`] and [`Range`]: 1-based caret coordinates
//! - [`Decoration`]: One-character correctness markup
//!
//! Columns count user-perceived characters (extended grapheme clusters),
//! so a combining sequence or an emoji occupies exactly one column.

mod decoration;
mod position;
mod practice;
mod traits;

pub use decoration::Decoration;
pub use position::{Position, Range};
pub use practice::PracticeSurface;
pub use traits::{ExpectedChar, TextSurface};

use thiserror::Error;

/// Errors raised by position queries against a surface.
///
/// These never escape the validator: an event that hits one of them is
/// dropped and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The position lies outside the buffer.
    #[error("position {0} is outside the buffer")]
    MalformedPosition(Position),

    /// The buffer holds no characters at all.
    #[error("buffer is empty")]
    EmptyBuffer,
}
