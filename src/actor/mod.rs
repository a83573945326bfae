//! Actor Model: Message-passing between the input thread and the main loop.
//!
//! - **Input Actor**: Polls terminal events, forwards to main loop
//! - **Main Loop**: Validates keystrokes, renders frames
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │  Main Loop   │ ──▶ stdout
//! └──────────────┘                     └──────────────┘
//! ```

mod engine;
mod input;
mod messages;

pub use engine::{Engine, EngineConfig};
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
