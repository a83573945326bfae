//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to capture keyboard, paste, focus and resize events without blocking
//! the main loop. The main loop is the only consumer of the channel, so
//! events are validated strictly in arrival order.

use super::messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind, ModifierKeyCode};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Input actor that polls terminal events.
///
/// Dropping the actor signals the thread to stop.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the main loop.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("devtyping-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                debug!("input receiver dropped");
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read terminal event");
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {
                    // No event, loop again to check shutdown
                }
                Err(e) => {
                    warn!(error = %e, "failed to poll terminal events");
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to our `InputEvent`.
pub(crate) fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Held keys repeat like fresh key-downs; releases are dropped
            if key_event.kind == KeyEventKind::Release {
                return None;
            }

            let modifiers = convert_modifiers(key_event.modifiers);
            let code = convert_key_code(key_event.code, modifiers)?;

            Some(InputEvent::Key(KeyEvent { code, modifiers }))
        }

        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),

        Event::FocusGained => Some(InputEvent::FocusGained),

        Event::FocusLost => Some(InputEvent::FocusLost),

        Event::Paste(text) => Some(InputEvent::Paste(text)),

        Event::Mouse(_) => None,
    }
}

/// Convert crossterm `KeyCode` to our `KeyCode`.
fn convert_key_code(code: event::KeyCode, modifiers: KeyModifiers) -> Option<KeyCode> {
    Some(match code {
        // Enhanced keyboard reporting can deliver the unshifted letter
        event::KeyCode::Char(c) if modifiers.shift && c.is_ascii_lowercase() => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Null => KeyCode::Null,
        event::KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            KeyCode::Shift
        }
        event::KeyCode::Modifier(_) => KeyCode::Modifier,
        _ => return None, // Ignore lock keys, media keys, etc.
    })
}

/// Convert crossterm `KeyModifiers` to our `KeyModifiers`.
fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
        super_key: mods.contains(event::KeyModifiers::SUPER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent as CtKeyEvent, KeyEventState};

    fn key(code: event::KeyCode, mods: event::KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(CtKeyEvent {
            code,
            modifiers: mods,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_and_repeat_but_not_release() {
        let press = key(event::KeyCode::Char('a'), event::KeyModifiers::NONE, KeyEventKind::Press);
        let repeat = key(event::KeyCode::Char('a'), event::KeyModifiers::NONE, KeyEventKind::Repeat);
        let release = key(event::KeyCode::Char('a'), event::KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(convert_event(press), Some(InputEvent::Key(KeyEvent::char('a'))));
        assert_eq!(convert_event(repeat), Some(InputEvent::Key(KeyEvent::char('a'))));
        assert_eq!(convert_event(release), None);
    }

    #[test]
    fn test_bare_modifiers() {
        let shift = key(
            event::KeyCode::Modifier(ModifierKeyCode::LeftShift),
            event::KeyModifiers::SHIFT,
            KeyEventKind::Press,
        );
        let Some(InputEvent::Key(shift)) = convert_event(shift) else {
            panic!("expected a key event");
        };
        assert_eq!(shift.code, KeyCode::Shift);

        let ctrl = key(
            event::KeyCode::Modifier(ModifierKeyCode::LeftControl),
            event::KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        let Some(InputEvent::Key(ctrl)) = convert_event(ctrl) else {
            panic!("expected a key event");
        };
        assert_eq!(ctrl.code, KeyCode::Modifier);
    }

    #[test]
    fn test_shifted_letter_is_uppercased() {
        let event = key(event::KeyCode::Char('q'), event::KeyModifiers::SHIFT, KeyEventKind::Press);
        let Some(InputEvent::Key(k)) = convert_event(event) else {
            panic!("expected a key event");
        };
        assert_eq!(k.produced(), Some('Q'));
    }

    #[test]
    fn test_paste_and_resize() {
        assert_eq!(
            convert_event(Event::Paste("x = 1".into())),
            Some(InputEvent::Paste("x = 1".into()))
        );
        assert_eq!(
            convert_event(Event::Resize(100, 40)),
            Some(InputEvent::Resize { width: 100, height: 40 })
        );
    }
}
