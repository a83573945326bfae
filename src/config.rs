//! Configuration: engine timing, files and colours.

use crate::actor::EngineConfig;
use crate::terminal::{Paint, Rgb, Style};
use std::path::PathBuf;

/// Practice text shown when nothing else is available.
pub const DEFAULT_MODEL: &str = "fn sum(a: i32, b: i32) -> i32 {\n\ta + b\n}";

/// Colour theme for the editor and status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Editor background.
    pub background: Rgb,
    /// Text not typed yet.
    pub pending: Rgb,
    /// Text typed correctly.
    pub correct: Rgb,
    /// Text typed incorrectly (foreground).
    pub incorrect: Rgb,
    /// Text typed incorrectly (background).
    pub incorrect_bg: Rgb,
    /// Line number gutter.
    pub gutter: Rgb,
    /// Line number of the caret's line.
    pub gutter_active: Rgb,
    /// Status bar background.
    pub status_bg: Rgb,
    /// Status bar text.
    pub status_fg: Rgb,
    /// Status bar highlights.
    pub status_accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::from_u32(0x1E_1E_1E),
            pending: Rgb::from_u32(0x6A_73_7D),
            correct: Rgb::from_u32(0xA7_F3_D0),
            incorrect: Rgb::from_u32(0xFF_E4_E6),
            incorrect_bg: Rgb::from_u32(0x9F_12_39),
            gutter: Rgb::from_u32(0x4B_50_58),
            gutter_active: Rgb::from_u32(0xC6_C6_C6),
            status_bg: Rgb::from_u32(0x2D_1B_4E),
            status_fg: Rgb::from_u32(0xE9_D5_FF),
            status_accent: Rgb::from_u32(0xA7_F3_D0),
        }
    }
}

impl Theme {
    /// Paint for untyped text.
    pub const fn pending_paint(&self) -> Paint {
        Paint::new(self.pending, self.background)
    }

    /// Paint for correctly typed text.
    pub const fn correct_paint(&self) -> Paint {
        Paint::new(self.correct, self.background)
    }

    /// Paint for incorrectly typed text.
    pub const fn incorrect_paint(&self) -> Paint {
        Paint::new(self.incorrect, self.incorrect_bg).with_style(Style::BOLD)
    }

    /// Paint for line numbers.
    pub const fn gutter_paint(&self, active: bool) -> Paint {
        let fg = if active { self.gutter_active } else { self.gutter };
        Paint::new(fg, self.background)
    }
}

/// Top-level configuration for the trainer.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Terminal engine settings.
    pub engine: EngineConfig,
    /// History file; `None` disables persistence.
    pub history_path: Option<PathBuf>,
    /// Colours.
    pub theme: Theme,
    /// Columns a tab character expands to on screen.
    pub tab_width: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            history_path: Some(PathBuf::from("devtyping.json")),
            theme: Theme::default(),
            tab_width: 4,
        }
    }
}
