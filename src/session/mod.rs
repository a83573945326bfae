//! Session Management: Lifecycle, statistics and history.
//!
//! # Components
//! - `lifecycle.rs`: Armed / Active / Completed tracking and signal forwarding
//! - `stats.rs`: Verdict counting, accuracy and WPM
//! - `history.rs`: JSON persistence of finished sessions and the current model

pub mod history;
pub mod lifecycle;
pub mod stats;

pub use history::{History, HistoryError, HistoryStore, HistorySummary};
pub use lifecycle::{LifecycleSignals, SessionLifecycle, SessionObserver, SessionState};
pub use stats::{SessionStats, StatsTracker};
