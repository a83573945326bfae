//! # DevTyping
//!
//! A code typing trainer for the terminal.
//!
//! The typist retypes a practice text in place. Every key-down is checked
//! against the character under the caret, painted correct or incorrect,
//! and the caret moves forward either way. Deletion and caret navigation
//! are blocked, and Enter at the end of a line skips the next line's
//! indentation.
//!
//! ## Core Concepts
//!
//! - **Validator**: a stateless keystroke state machine over a [`TextSurface`]
//! - **Lifecycle**: `Armed`, `Active`, `Completed`, reported to a [`SessionObserver`]
//! - **Actor model**: terminal input polled on its own thread
//! - **Single write per frame**: widgets render into one ANSI [`OutputBuffer`]
//!
//! ## Example
//!
//! ```rust
//! use devtyping::{KeyEvent, KeystrokeValidator, PracticeSurface, TextSurface, Verdict};
//!
//! let mut surface = PracticeSurface::new("ab");
//! let validator = KeystrokeValidator::new();
//!
//! let outcome = validator.handle_key_event(&KeyEvent::char('a'), &mut surface);
//! assert_eq!(outcome.verdict, Some(Verdict::Correct));
//!
//! validator.handle_key_event(&KeyEvent::char('x'), &mut surface);
//! assert!(surface.is_read_only());
//! ```
//!
//! Colours and text attributes:
//!
//! ```rust
//! use devtyping::{Paint, Rgb, Style};
//!
//! let paint = Paint::new(Rgb::WHITE, Rgb::BLACK).with_style(Style::BOLD | Style::UNDERLINE);
//! assert!(paint.style.contains(Style::BOLD));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod config;
pub mod error;
pub mod layout;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod validator;
pub mod widget;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, InputEvent, KeyCode, KeyEvent, KeyModifiers};
pub use app::{initial_text, App};
pub use config::{Theme, TrainerConfig, DEFAULT_MODEL};
pub use error::TrainerError;
pub use layout::{Rect, ScreenLayout};
pub use session::{
    HistoryError, HistoryStore, LifecycleSignals, SessionLifecycle, SessionObserver, SessionState,
    SessionStats, StatsTracker,
};
pub use surface::{Decoration, Position, PracticeSurface, Range, SurfaceError, TextSurface};
pub use terminal::{OutputBuffer, Paint, Rgb, Style};
pub use validator::{CursorAction, KeyClass, KeystrokeValidator, Outcome, Verdict};
pub use widget::{EditorView, StatusBar, Widget};
