//! Host-level errors.

use crate::session::HistoryError;
use std::io;
use thiserror::Error;

/// Errors that end the trainer.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Terminal setup or frame output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The history file could not be opened.
    #[error(transparent)]
    History(#[from] HistoryError),
}
