//! Session lifecycle: Armed, Active and Completed.
//!
//! ```text
//!            paste / load / retry
//!                    │
//!                    ▼
//!   ┌───────┐  any key at (1,1)  ┌────────┐  end of buffer  ┌───────────┐
//!   │ Armed │ ─────────────────▶ │ Active │ ──────────────▶ │ Completed │
//!   └───────┘                    └────────┘                 └───────────┘
//! ```
//!
//! Only the host leaves `Completed`, by re-arming with a new or the same
//! text.

use crate::surface::{Position, TextSurface};
use crate::validator::{Outcome, Verdict};
use bitflags::bitflags;
use tracing::{debug, info};

bitflags! {
    /// Lifecycle signals raised by a single event.
    ///
    /// One key can raise both: typing the only character of a one-character
    /// buffer starts and ends the session at once.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LifecycleSignals: u8 {
        /// The typist began at the first character.
        const SESSION_START = 0b0000_0001;
        /// The caret reached the end of the buffer.
        const SESSION_END = 0b0000_0010;
    }
}

impl std::fmt::Debug for LifecycleSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// State of a typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Buffer loaded, caret at the origin, nothing typed yet.
    #[default]
    Armed,
    /// Typing in progress.
    Active,
    /// End of buffer reached; the surface is read-only.
    Completed,
}

/// Receives lifecycle transitions.
///
/// The host wires these to its timer and stats.
pub trait SessionObserver {
    /// A session started (or was re-armed by a paste).
    fn on_session_start(&mut self);

    /// A session finished.
    fn on_session_end(&mut self);

    /// A keystroke was judged during the session.
    fn on_verdict(&mut self, _verdict: Verdict) {}
}

impl SessionObserver for () {
    fn on_session_start(&mut self) {}
    fn on_session_end(&mut self) {}
}

/// Guards lifecycle transitions and forwards them to an observer.
#[derive(Debug, Clone, Default)]
pub struct SessionLifecycle {
    state: SessionState,
}

impl SessionLifecycle {
    /// Create a lifecycle in the `Armed` state.
    pub const fn new() -> Self {
        Self {
            state: SessionState::Armed,
        }
    }

    /// Current state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Deliver a start signal.
    ///
    /// Returns `true` if the observer was notified; repeated starts while
    /// `Active` or `Completed` are no-ops.
    pub fn session_start(&mut self, observer: &mut dyn SessionObserver) -> bool {
        if self.state != SessionState::Armed {
            return false;
        }
        self.state = SessionState::Active;
        info!("session started");
        observer.on_session_start();
        true
    }

    /// Deliver an end signal.
    ///
    /// Returns `true` the first time only.
    pub fn session_end(&mut self, observer: &mut dyn SessionObserver) -> bool {
        match self.state {
            SessionState::Completed => false,
            previous => {
                if previous == SessionState::Armed {
                    debug!("session ended without a start signal");
                }
                self.state = SessionState::Completed;
                info!("session completed");
                observer.on_session_end();
                true
            }
        }
    }

    /// Forward a validator outcome: start, then the verdict, then end.
    ///
    /// Returns the signals that actually reached the observer.
    pub fn dispatch(&mut self, outcome: &Outcome, observer: &mut dyn SessionObserver) -> LifecycleSignals {
        let mut delivered = LifecycleSignals::empty();

        if outcome.lifecycle.contains(LifecycleSignals::SESSION_START) && self.session_start(observer) {
            delivered |= LifecycleSignals::SESSION_START;
        }

        if let Some(verdict) = outcome.verdict {
            if self.state == SessionState::Completed {
                debug!(?verdict, "verdict after completion dropped");
            } else {
                observer.on_verdict(verdict);
            }
        }

        if outcome.lifecycle.contains(LifecycleSignals::SESSION_END) && self.session_end(observer) {
            delivered |= LifecycleSignals::SESSION_END;
        }

        delivered
    }

    /// Put a freshly loaded (or retried) buffer in the `Armed` state.
    ///
    /// The caret returns to the origin, decorations are cleared and the
    /// surface is unlocked and focused. An empty buffer cannot be typed, so
    /// it lands directly in `Completed` and stays locked.
    pub fn arm<S>(&mut self, surface: &mut S)
    where
        S: TextSurface + ?Sized,
    {
        surface.set_position(Position::ORIGIN);
        surface.clear_decorations();
        surface.focus();

        if surface.is_empty() {
            info!("empty buffer loaded, nothing to type");
            surface.set_read_only(true);
            self.state = SessionState::Completed;
        } else {
            surface.set_read_only(false);
            self.state = SessionState::Armed;
        }
    }

    /// A full-buffer paste replaced the surface's text.
    ///
    /// Arms the surface and fires `on_session_start` so the host resets its
    /// counters. The state stays `Armed`: the first keystroke at the origin
    /// is what makes the session `Active`.
    pub fn paste_accepted<S>(&mut self, surface: &mut S, observer: &mut dyn SessionObserver) -> LifecycleSignals
    where
        S: TextSurface + ?Sized,
    {
        self.arm(surface);
        if self.state == SessionState::Armed {
            observer.on_session_start();
            LifecycleSignals::SESSION_START
        } else {
            LifecycleSignals::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, KeyEvent};
    use crate::surface::PracticeSurface;
    use crate::validator::KeystrokeValidator;

    #[derive(Default)]
    struct Recorder {
        starts: u32,
        ends: u32,
        verdicts: Vec<Verdict>,
    }

    impl SessionObserver for Recorder {
        fn on_session_start(&mut self) {
            self.starts += 1;
        }

        fn on_session_end(&mut self) {
            self.ends += 1;
        }

        fn on_verdict(&mut self, verdict: Verdict) {
            self.verdicts.push(verdict);
        }
    }

    fn press(
        lifecycle: &mut SessionLifecycle,
        surface: &mut PracticeSurface,
        recorder: &mut Recorder,
        event: KeyEvent,
    ) -> LifecycleSignals {
        let outcome = KeystrokeValidator::new().handle_key_event(&event, surface);
        lifecycle.dispatch(&outcome, recorder)
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut lifecycle = SessionLifecycle::new();
        let mut recorder = Recorder::default();

        assert!(lifecycle.session_start(&mut recorder));
        assert!(!lifecycle.session_start(&mut recorder));
        assert_eq!(lifecycle.state(), SessionState::Active);
        assert_eq!(recorder.starts, 1);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut lifecycle = SessionLifecycle::new();
        let mut recorder = Recorder::default();
        lifecycle.session_start(&mut recorder);

        assert!(lifecycle.session_end(&mut recorder));
        assert!(!lifecycle.session_end(&mut recorder));
        assert_eq!(lifecycle.state(), SessionState::Completed);
        assert_eq!(recorder.ends, 1);

        assert!(!lifecycle.session_start(&mut recorder));
        assert_eq!(lifecycle.state(), SessionState::Completed);
    }

    #[test]
    fn test_two_char_session() {
        let mut lifecycle = SessionLifecycle::new();
        let mut surface = PracticeSurface::new("ab");
        let mut recorder = Recorder::default();
        lifecycle.arm(&mut surface);

        let first = press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('a'));
        assert_eq!(first, LifecycleSignals::SESSION_START);
        assert_eq!(lifecycle.state(), SessionState::Active);

        let second = press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('x'));
        assert_eq!(second, LifecycleSignals::SESSION_END);
        assert_eq!(lifecycle.state(), SessionState::Completed);

        assert_eq!(recorder.verdicts, vec![Verdict::Correct, Verdict::Incorrect]);
        assert_eq!((recorder.starts, recorder.ends), (1, 1));

        let after = press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('b'));
        assert!(after.is_empty());
        assert_eq!(recorder.verdicts.len(), 2);
        assert_eq!(recorder.ends, 1);
    }

    #[test]
    fn test_blocked_key_at_origin_starts_once() {
        let mut lifecycle = SessionLifecycle::new();
        let mut surface = PracticeSurface::new("xyz");
        let mut recorder = Recorder::default();
        lifecycle.arm(&mut surface);

        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::plain(KeyCode::Up));
        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('x'));
        assert_eq!(recorder.starts, 1);
        assert_eq!(recorder.verdicts, vec![Verdict::Correct]);
    }

    #[test]
    fn test_paste_rearms_completed_session() {
        let mut lifecycle = SessionLifecycle::new();
        let mut surface = PracticeSurface::new("a");
        let mut recorder = Recorder::default();
        lifecycle.arm(&mut surface);
        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('a'));
        assert!(surface.is_read_only());

        surface.set_text("let y = 2;");
        let signals = lifecycle.paste_accepted(&mut surface, &mut recorder);

        assert_eq!(signals, LifecycleSignals::SESSION_START);
        assert_eq!(lifecycle.state(), SessionState::Armed);
        assert_eq!(surface.position(), Position::ORIGIN);
        assert!(!surface.is_read_only());
        assert!(surface.is_focused());
        assert_eq!(recorder.starts, 2);

        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('l'));
        assert_eq!(lifecycle.state(), SessionState::Active);
        assert_eq!(recorder.starts, 3);
    }

    #[test]
    fn test_empty_buffer_is_completed() {
        let mut lifecycle = SessionLifecycle::new();
        let mut surface = PracticeSurface::new("");
        let mut recorder = Recorder::default();

        let signals = lifecycle.paste_accepted(&mut surface, &mut recorder);
        assert!(signals.is_empty());
        assert_eq!(lifecycle.state(), SessionState::Completed);
        assert!(surface.is_read_only());
        assert_eq!(recorder.starts, 0);
    }

    #[test]
    fn test_arm_resets_progress() {
        let mut lifecycle = SessionLifecycle::new();
        let mut surface = PracticeSurface::new("ab");
        let mut recorder = Recorder::default();
        lifecycle.arm(&mut surface);
        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('a'));
        press(&mut lifecycle, &mut surface, &mut recorder, KeyEvent::char('b'));

        lifecycle.arm(&mut surface);
        assert_eq!(lifecycle.state(), SessionState::Armed);
        assert_eq!(surface.position(), Position::ORIGIN);
        assert_eq!(surface.decoration_count(), 0);
        assert!(!surface.is_read_only());
    }
}
