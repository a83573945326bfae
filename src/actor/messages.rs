//! Message types for actor communication.
//!
//! These enums define the protocol between the input thread and the main
//! loop.

/// Key codes for keyboard input.
///
/// This is the subset of crossterm's `KeyCode` a typing session cares
/// about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// A bare Shift press (only reported with keyboard enhancement).
    Shift,
    /// Any other bare modifier press (Control, Alt, Super, ...).
    Modifier,
    /// Null (Ctrl+Space on some terminals).
    Null,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
    /// Super/Command/Windows key held.
    pub super_key: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        super_key: false,
    };

    /// Only Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        super_key: false,
    };

    /// Check if a chord modifier (anything but Shift) is active.
    pub const fn chord(&self) -> bool {
        self.control || self.alt || self.super_key
    }
}

/// A single key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during keypress.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A character key press. Shift state is already folded into `c`.
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// The character this key inserts, if any.
    ///
    /// Chords (Control/Alt/Super held) insert nothing. Enter and Tab
    /// produce their control characters.
    pub const fn produced(&self) -> Option<char> {
        if self.modifiers.chord() {
            return None;
        }
        match self.code {
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            _ => None,
        }
    }

    /// Check for a Control chord on a character key.
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.control && self.code == KeyCode::Char(c)
    }
}

/// Events from the input thread.
///
/// These are sent from the input actor to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained.
    FocusGained,

    /// Focus lost.
    FocusLost,

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produced_char() {
        assert_eq!(KeyEvent::char('x').produced(), Some('x'));
        assert_eq!(KeyEvent::plain(KeyCode::Enter).produced(), Some('\n'));
        assert_eq!(KeyEvent::plain(KeyCode::Left).produced(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Shift).produced(), None);
    }

    #[test]
    fn test_chords_produce_nothing() {
        let ctrl_r = KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(ctrl_r.produced(), None);
        assert!(ctrl_r.is_ctrl('r'));

        let shifted = KeyEvent {
            code: KeyCode::Char('R'),
            modifiers: KeyModifiers {
                shift: true,
                ..KeyModifiers::NONE
            },
        };
        assert_eq!(shifted.produced(), Some('R'));
    }
}
