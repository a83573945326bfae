//! History: JSON persistence for finished sessions.
//!
//! The file also remembers the last pasted text (the "current model") so
//! the next launch opens on the same practice buffer.

use super::stats::SessionStats;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Filesystem error.
    #[error("history file {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file exists but is not valid history JSON.
    #[error("history file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything stored in the history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Last text loaded by a paste.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_model: Option<String>,
    /// Finished sessions, oldest first.
    #[serde(default)]
    pub sessions: Vec<SessionStats>,
}

/// Aggregate over all stored sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySummary {
    /// Number of sessions.
    pub sessions: usize,
    /// Mean accuracy (percent).
    pub avg_accuracy: f64,
    /// Mean WPM.
    pub avg_wpm: f64,
    /// Best WPM.
    pub best_wpm: f64,
}

impl History {
    /// Aggregate stats, or `None` before the first session.
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> Option<HistorySummary> {
        if self.sessions.is_empty() {
            return None;
        }
        let n = self.sessions.len() as f64;
        let (acc, wpm, best) = self.sessions.iter().fold((0.0, 0.0, 0.0_f64), |(a, w, b), s| {
            (a + s.accuracy, w + s.wpm, b.max(s.wpm))
        });
        Some(HistorySummary {
            sessions: self.sessions.len(),
            avg_accuracy: acc / n,
            avg_wpm: wpm / n,
            best_wpm: best,
        })
    }
}

/// A history file on disk with its loaded contents.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    history: History,
}

impl HistoryStore {
    /// Open (or start) the history file at `path`.
    ///
    /// A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let history = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                History::default()
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };
        Ok(Self { path, history })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded history.
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Append a finished session and save.
    pub fn record_session(&mut self, stats: SessionStats) -> Result<(), HistoryError> {
        info!(wpm = stats.wpm, accuracy = stats.accuracy, "session recorded");
        self.history.sessions.push(stats);
        self.save()
    }

    /// Remember the current practice text and save.
    pub fn save_current_model(&mut self, text: &str) -> Result<(), HistoryError> {
        self.history.current_model = Some(text.to_string());
        self.save()
    }

    /// Write the history, replacing the file atomically.
    fn save(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(&self.history)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| HistoryError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
