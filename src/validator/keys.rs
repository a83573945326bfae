//! Key classification.

use crate::actor::{KeyCode, KeyEvent};

/// How the validator treats a key before looking at the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Navigation and deletion keys that would let the typist skip or
    /// self-correct.
    Blocked,
    /// Shift alone. It only shapes the next produced character.
    Modifier,
    /// Keys that neither insert nor navigate (Delete, Home, F-keys, chords).
    PassThrough,
    /// Enter/Return. Special at end of line, a plain `'\n'` elsewhere.
    Enter,
    /// A key inserting this character.
    Producing(char),
}

impl KeyClass {
    /// Classify a key event.
    pub const fn of(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Backspace
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab => Self::Blocked,
            KeyCode::Shift => Self::Modifier,
            KeyCode::Delete => Self::PassThrough,
            KeyCode::Enter if !event.modifiers.chord() => Self::Enter,
            _ => match event.produced() {
                Some(c) => Self::Producing(c),
                None => Self::PassThrough,
            },
        }
    }

    /// The character compared against the buffer, if this class is compared
    /// at all.
    pub const fn produced(self) -> Option<char> {
        match self {
            Self::Enter => Some('\n'),
            Self::Producing(c) => Some(c),
            Self::Blocked | Self::Modifier | Self::PassThrough => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    #[test]
    fn test_blocked_keys() {
        for code in [
            KeyCode::Backspace,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Tab,
        ] {
            assert_eq!(KeyClass::of(&KeyEvent::plain(code)), KeyClass::Blocked);
        }
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(KeyClass::of(&KeyEvent::plain(KeyCode::Shift)), KeyClass::Modifier);
        assert_eq!(KeyClass::of(&KeyEvent::plain(KeyCode::Delete)), KeyClass::PassThrough);
        assert_eq!(KeyClass::of(&KeyEvent::plain(KeyCode::Home)), KeyClass::PassThrough);
        assert_eq!(KeyClass::of(&KeyEvent::plain(KeyCode::Enter)), KeyClass::Enter);
        assert_eq!(KeyClass::of(&KeyEvent::char('{')), KeyClass::Producing('{'));
    }

    #[test]
    fn test_chord_is_pass_through() {
        let event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(KeyClass::of(&event), KeyClass::PassThrough);
    }
}
