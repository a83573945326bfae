//! Terminal output: ANSI frame building and styling primitives.

mod output;
mod style;

pub use output::OutputBuffer;
pub use style::{Paint, Rgb, Style};
