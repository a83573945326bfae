//! App: The typing trainer host.
//!
//! Owns the practice surface and routes every input event: host controls
//! first, keystrokes through the validator, lifecycle signals to the stats
//! tracker and finished sessions to the history file.

use crate::actor::{Engine, InputEvent, KeyCode, KeyEvent};
use crate::config::{Theme, TrainerConfig, DEFAULT_MODEL};
use crate::error::TrainerError;
use crate::layout::{Rect, ScreenLayout};
use crate::session::{
    HistoryStore, LifecycleSignals, SessionLifecycle, SessionState, SessionStats, StatsTracker,
};
use crate::surface::{PracticeSurface, TextSurface};
use crate::terminal::OutputBuffer;
use crate::validator::KeystrokeValidator;
use crate::widget::{EditorView, StatusBar, StatusBarConfig, Widget};
use std::time::Instant;
use tracing::{debug, info, warn};

const HELP: &str = "^R retry  ^N new  Esc quit";

/// Pick the text a fresh launch practices on.
///
/// An explicit file wins, then the last pasted text, then the built-in
/// sample.
pub fn initial_text(file_text: Option<String>, history: Option<&HistoryStore>) -> String {
    file_text
        .or_else(|| history.and_then(|h| h.history().current_model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// The trainer application.
pub struct App {
    surface: PracticeSurface,
    validator: KeystrokeValidator,
    lifecycle: SessionLifecycle,
    stats: StatsTracker,
    history: Option<HistoryStore>,
    theme: Theme,
    tab_width: usize,
    /// First visible editor line.
    scroll_top: usize,
    should_quit: bool,
    /// Stats of the last finished session.
    last_stats: Option<SessionStats>,
    status: StatusBar,
    /// Elapsed seconds shown in the last frame.
    shown_secs: u64,
}

impl App {
    /// Create an app practicing `text`.
    pub fn new(text: &str, config: &TrainerConfig, history: Option<HistoryStore>) -> Self {
        let status_config = StatusBarConfig {
            bg: config.theme.status_bg,
            left_fg: config.theme.status_accent,
            center_fg: config.theme.status_fg,
            right_fg: config.theme.status_fg,
        };
        let mut app = Self {
            surface: PracticeSurface::new(text),
            validator: KeystrokeValidator::new(),
            lifecycle: SessionLifecycle::new(),
            stats: StatsTracker::new(),
            history,
            theme: config.theme.clone(),
            tab_width: config.tab_width,
            scroll_top: 1,
            should_quit: false,
            last_stats: None,
            status: StatusBar::with_config(Rect::ZERO, status_config),
            shown_secs: 0,
        };
        app.lifecycle.arm(&mut app.surface);
        app
    }

    /// The practice surface.
    pub const fn surface(&self) -> &PracticeSurface {
        &self.surface
    }

    /// Current session state.
    pub const fn state(&self) -> SessionState {
        self.lifecycle.state()
    }

    /// Live counters of the current session.
    pub const fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Stats of the last finished session, if any.
    pub const fn last_stats(&self) -> Option<&SessionStats> {
        self.last_stats.as_ref()
    }

    /// The history store, if persistence is enabled.
    pub const fn history(&self) -> Option<&HistoryStore> {
        self.history.as_ref()
    }

    /// Whether the user asked to quit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route one input event. Returns `true` if the screen changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => {
                self.load_pasted(&text);
                true
            }
            InputEvent::FocusGained => {
                self.surface.focus();
                true
            }
            InputEvent::FocusLost => {
                self.surface.set_focused(false);
                false
            }
            InputEvent::Resize { .. } => true,
            InputEvent::Error(e) => {
                warn!(error = %e, "input error");
                false
            }
            InputEvent::Shutdown => {
                self.should_quit = true;
                false
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc || key.is_ctrl('c') {
            info!("quit requested");
            self.should_quit = true;
            return false;
        }
        if key.is_ctrl('r') {
            self.retry();
            return true;
        }
        if key.is_ctrl('n') {
            self.new_text();
            return true;
        }

        let outcome = self.validator.handle_key_event(&key, &mut self.surface);
        if outcome.is_ignored() {
            return false;
        }
        let delivered = self.lifecycle.dispatch(&outcome, &mut self.stats);
        if delivered.contains(LifecycleSignals::SESSION_END) {
            self.finish();
        }
        !delivered.is_empty() || outcome.decoration.is_some() || outcome.cursor.target().is_some()
    }

    /// Replace the text with a paste and arm a fresh session.
    fn load_pasted(&mut self, text: &str) {
        debug!(bytes = text.len(), "paste received");
        self.surface.set_text(text);
        self.last_stats = None;
        self.scroll_top = 1;
        self.lifecycle.paste_accepted(&mut self.surface, &mut self.stats);
        if let Some(history) = self.history.as_mut() {
            if let Err(e) = history.save_current_model(&self.surface.text()) {
                warn!(error = %e, path = %history.path().display(), "failed to save practice text");
            }
        }
    }

    /// Re-arm the same text.
    fn retry(&mut self) {
        info!("retry");
        self.stats.reset();
        self.last_stats = None;
        self.scroll_top = 1;
        self.lifecycle.arm(&mut self.surface);
    }

    /// Clear the buffer and wait for a paste.
    fn new_text(&mut self) {
        info!("new text requested, waiting for paste");
        self.surface.set_text("");
        self.retry();
    }

    fn finish(&mut self) {
        let stats = self.stats.snapshot();
        info!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            time = stats.time,
            "session finished"
        );
        if let Some(history) = self.history.as_mut() {
            if let Err(e) = history.record_session(stats.clone()) {
                warn!(error = %e, path = %history.path().display(), "failed to record session");
            }
        }
        self.last_stats = Some(stats);
    }

    fn status_texts(&self) -> (String, String) {
        let left = match self.state() {
            SessionState::Armed => " READY".to_string(),
            SessionState::Active => " TYPING".to_string(),
            SessionState::Completed if self.surface.is_empty() => " PASTE A TEXT".to_string(),
            SessionState::Completed => " DONE".to_string(),
        };

        let center = if let Some(stats) = &self.last_stats {
            format_stats(stats)
        } else if self.state() == SessionState::Active {
            let live = SessionStats::new(
                self.stats.elapsed(Instant::now()),
                self.stats.correct(),
                self.stats.errors(),
            );
            format_stats(&live)
        } else if let Some(summary) = self.history.as_ref().and_then(|h| h.history().summary()) {
            format!(
                "{} sessions  avg {:.0} wpm  best {:.0}",
                summary.sessions, summary.avg_wpm, summary.best_wpm
            )
        } else {
            String::new()
        };

        (left, center)
    }

    /// Whether the live timer needs a new frame.
    fn clock_ticked(&self) -> bool {
        self.stats.is_running() && self.stats.elapsed(Instant::now()).as_secs() != self.shown_secs
    }

    /// Render a full frame. The caret is placed at the next expected
    /// character, or hidden once the session is over.
    pub fn render(&mut self, width: u16, height: u16, out: &mut OutputBuffer) {
        let layout = ScreenLayout::compute(width, height);
        let cursor_line = self.surface.position().line;
        self.scroll_top = EditorView::follow(self.scroll_top, cursor_line, usize::from(layout.editor.height));

        out.cursor_hide();
        let view = EditorView::new(&self.surface, &self.theme, layout.editor)
            .with_scroll(self.scroll_top)
            .with_tab_width(self.tab_width);
        view.render(out);
        let caret = view.caret();

        let (left, center) = self.status_texts();
        self.status.set_all(left, center, HELP);
        self.status.set_bounds(layout.status);
        self.status.render(out);
        out.reset_attrs();

        if let Some((x, y)) = caret {
            out.cursor_move(x, y);
            out.cursor_show();
        }

        self.shown_secs = self.stats.elapsed(Instant::now()).as_secs();
        self.surface.clear_redraw();
    }

    /// Main loop: wait for input, route it, redraw when something changed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing a frame fails.
    pub fn run(&mut self, engine: &mut Engine) -> Result<(), TrainerError> {
        let mut frame = OutputBuffer::new();
        let mut dirty = true;

        while !self.should_quit {
            if let Some(event) = engine.wait_input(engine.frame_duration()) {
                dirty |= self.route(engine, event, &mut frame);
                while let Some(event) = engine.poll_input() {
                    dirty |= self.route(engine, event, &mut frame);
                }
            }
            if self.should_quit {
                break;
            }

            if dirty || self.surface.needs_redraw() || self.clock_ticked() {
                self.render(engine.width(), engine.height(), &mut frame);
                engine.present(&frame)?;
                frame.clear();
                dirty = false;
            }
        }
        Ok(())
    }

    fn route(&mut self, engine: &mut Engine, event: InputEvent, frame: &mut OutputBuffer) -> bool {
        if let InputEvent::Resize { width, height } = event {
            engine.handle_resize(width, height);
            frame.clear_screen();
        }
        self.handle_event(event)
    }
}

fn format_stats(stats: &SessionStats) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = stats.time as u64;
    format!(
        "{:.0} wpm  {:.0}% acc  {}:{:02}",
        stats.wpm,
        stats.accuracy,
        secs / 60,
        secs % 60
    )
}
