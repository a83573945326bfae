//! Decoration: Visual correctness markup.

use super::position::{Position, Range};
use crate::validator::Verdict;

/// A one-character range tagged with the verdict of the keystroke that
/// covered it.
///
/// Decorations feed rendering only; the validator never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// The decorated range.
    pub range: Range,
    /// Verdict colouring the range.
    pub verdict: Verdict,
}

impl Decoration {
    /// Decorate the character at `position`.
    pub const fn at(position: Position, verdict: Verdict) -> Self {
        Self {
            range: Range::single(position),
            verdict,
        }
    }
}
