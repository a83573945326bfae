//! Engine: Terminal owner and input coordinator.
//!
//! The Engine puts the terminal into the modes a typing session needs
//! (raw mode, alternate screen, bracketed paste, focus reporting and,
//! when asked, keyboard enhancement so bare Shift presses are reported),
//! spawns the input actor and restores everything on drop.

use super::messages::InputEvent;
use super::InputActor;
use crate::terminal::OutputBuffer;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use crossterm::{
    cursor::{self, SetCursorStyle},
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to deliver pastes as one event.
    pub bracketed_paste: bool,
    /// Whether to push the kitty keyboard protocol flags.
    pub keyboard_enhancement: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            bracketed_paste: true,
            keyboard_enhancement: true,
        }
    }
}

/// The terminal engine.
///
/// Exactly one input actor is registered per engine; dropping the
/// engine shuts it down, so no keystroke handler outlives the session.
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Input event receiver.
    input_rx: Receiver<InputEvent>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    /// Terminal width.
    width: u16,
    /// Terminal height.
    height: u16,
    /// Frame timing.
    frame_duration: Duration,
    /// Whether keyboard enhancement flags were pushed.
    enhanced: bool,
}

impl Engine {
    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails or the input thread
    /// cannot be spawned.
    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        // Get terminal size
        let (width, height) = terminal::size()?;

        // Enter raw mode and alternate screen
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.bracketed_paste {
            execute!(stdout, EnableBracketedPaste)?;
        }
        execute!(stdout, EnableFocusChange, SetCursorStyle::SteadyUnderScore)?;

        // Unsupported terminals ignore the push; Shift is then only
        // seen folded into the characters it produces
        let enhanced = config.keyboard_enhancement
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                )
            )
            .is_ok();

        info!(width, height, enhanced, "terminal modes enabled");

        // Create channels
        let (input_tx, input_rx) = bounded::<InputEvent>(64);

        // Spawn actors
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;

        let frame_duration = Duration::from_secs(1) / config.target_fps.max(1);

        Ok(Self {
            config,
            input_rx,
            input_actor: Some(input_actor),
            width,
            height,
            frame_duration,
            enhanced,
        })
    }

    /// Get the terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Time budget of one frame at the target FPS.
    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Poll for the next input event (non-blocking).
    ///
    /// Returns `None` if no event is available.
    pub fn poll_input(&self) -> Option<InputEvent> {
        match self.input_rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(InputEvent::Error("Input channel disconnected".to_string()))
            }
        }
    }

    /// Wait for the next input event (blocking with timeout).
    pub fn wait_input(&self, timeout: Duration) -> Option<InputEvent> {
        self.input_rx.recv_timeout(timeout).ok()
    }

    /// Handle a resize event.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.width = width;
        self.height = height;
    }

    /// Write a finished frame to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&self, frame: &OutputBuffer) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        frame.flush_to(&mut stdout)?;
        stdout.flush()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        // Stop actors
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        // Restore terminal state
        let mut stdout = io::stdout();
        if self.enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            stdout,
            DisableFocusChange,
            SetCursorStyle::DefaultUserShape,
            cursor::Show
        );
        if self.config.bracketed_paste {
            let _ = execute!(stdout, DisableBracketedPaste);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}
