//! Keystroke Validator: The per-key state machine.

use super::keys::KeyClass;
use super::Verdict;
use crate::actor::KeyEvent;
use crate::session::LifecycleSignals;
use crate::surface::{Decoration, Position, TextSurface};
use tracing::{debug, trace};

/// What happened to the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// The caret did not move.
    Hold,
    /// The caret moved one column to the right.
    Advance(Position),
    /// The caret jumped to the next line, past its indentation.
    LineSkip(Position),
}

impl CursorAction {
    /// The new caret position, if the caret moved.
    pub const fn target(&self) -> Option<Position> {
        match self {
            Self::Hold => None,
            Self::Advance(p) | Self::LineSkip(p) => Some(*p),
        }
    }
}

/// The result of handling one key event.
///
/// The validator has already applied the decoration, caret move and
/// read-only lock to the surface by the time this is returned; the outcome
/// reports them so the host can forward verdicts and lifecycle signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Verdict for a compared keystroke.
    pub verdict: Option<Verdict>,
    /// Decoration applied to the surface.
    pub decoration: Option<Decoration>,
    /// Caret movement.
    pub cursor: CursorAction,
    /// Lifecycle signals raised by this key.
    pub lifecycle: LifecycleSignals,
    /// Whether the key's default editor behaviour was cancelled.
    pub suppressed: bool,
}

impl Outcome {
    /// An event that had no effect at all.
    pub const fn ignored() -> Self {
        Self {
            verdict: None,
            decoration: None,
            cursor: CursorAction::Hold,
            lifecycle: LifecycleSignals::empty(),
            suppressed: false,
        }
    }

    /// A suppressed key that holds the caret.
    const fn held(lifecycle: LifecycleSignals) -> Self {
        Self {
            verdict: None,
            decoration: None,
            cursor: CursorAction::Hold,
            lifecycle,
            suppressed: true,
        }
    }

    /// Check if this outcome did anything observable.
    pub const fn is_ignored(&self) -> bool {
        !self.suppressed && self.verdict.is_none() && self.lifecycle.is_empty()
    }
}

/// Checks keystrokes against a [`TextSurface`].
///
/// The validator owns no buffer state. The surface is passed to every call,
/// and the surface's read-only flag is the only thing that marks a finished
/// session.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeystrokeValidator;

impl KeystrokeValidator {
    /// Create a new validator.
    pub const fn new() -> Self {
        Self
    }

    /// Handle one key-down against the surface.
    pub fn handle_key_event<S>(&self, event: &KeyEvent, surface: &mut S) -> Outcome
    where
        S: TextSurface + ?Sized,
    {
        if surface.is_read_only() {
            trace!(?event, "surface is read-only, key ignored");
            return Outcome::ignored();
        }

        let current = surface.position();
        let class = KeyClass::of(event);

        let (at_line_end, matched) = match surface.expected_at(current) {
            Ok(expected) => (
                expected.is_end_of_line(),
                class.produced().is_some_and(|c| expected.matches(c)),
            ),
            Err(err) => {
                debug!(%err, ?event, "key dropped");
                return Outcome::ignored();
            }
        };

        let mut lifecycle = LifecycleSignals::empty();
        if current.is_origin() {
            lifecycle |= LifecycleSignals::SESSION_START;
        }

        let (verdict, cursor) = match class {
            KeyClass::Blocked | KeyClass::Modifier | KeyClass::PassThrough => {
                trace!(?event, %current, "key suppressed");
                return Outcome::held(lifecycle);
            }
            KeyClass::Enter if at_line_end => (None, line_skip(surface, current)),
            KeyClass::Enter | KeyClass::Producing(_) => {
                let verdict = if matched {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                };
                let cursor = if at_line_end {
                    line_skip(surface, current)
                } else {
                    CursorAction::Advance(current.next_column())
                };
                (Some(verdict), cursor)
            }
        };

        let decoration = verdict.map(|verdict| {
            let decoration = Decoration::at(current, verdict);
            surface.decorate(decoration);
            decoration
        });

        if let Some(target) = cursor.target() {
            surface.set_position(target);
        }

        if surface.position() == surface.end_position() {
            debug!(position = %surface.position(), "end of buffer reached");
            surface.set_read_only(true);
            lifecycle |= LifecycleSignals::SESSION_END;
        }

        Outcome {
            verdict,
            decoration,
            cursor,
            lifecycle,
            suppressed: true,
        }
    }
}

/// Caret move from the end of `current`'s line to the first non-blank
/// column of the next line.
fn line_skip<S>(surface: &S, current: Position) -> CursorAction
where
    S: TextSurface + ?Sized,
{
    let next = current.line + 1;
    if next > surface.line_count() {
        return CursorAction::Hold;
    }
    CursorAction::LineSkip(Position::new(next, surface.indentation(next) + 1))
}
