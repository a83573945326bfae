//! Validator: Keystroke-by-keystroke checking against the practice buffer.
//!
//! Every key-down goes through [`KeystrokeValidator::handle_key_event`],
//! which decides whether the key is suppressed, compared, or turned into a
//! line skip, and reports the result as an [`Outcome`].
//!
//! # Key policy
//!
//! ```text
//! read-only surface          -> ignored
//! Backspace, arrows, Tab     -> suppressed, caret holds
//! Shift, other bare keys     -> suppressed, caret holds
//! Delete                     -> suppressed, caret holds
//! Enter at end of line       -> caret jumps past next line's indentation
//! anything producing a char  -> Correct/Incorrect, caret advances
//! ```

mod keys;
mod keystroke;

pub use keys::KeyClass;
pub use keystroke::{CursorAction, KeystrokeValidator, Outcome};

/// Result of comparing one keystroke with the expected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The key produced the expected character.
    Correct,
    /// The key produced something else.
    Incorrect,
}
