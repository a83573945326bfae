//! Session statistics: accuracy and words per minute.
//!
//! A "word" is the conventional 4.7 characters, so WPM is
//! `(keystrokes / 4.7) / minutes`. Both correct and incorrect keystrokes
//! count toward speed.

use super::lifecycle::SessionObserver;
use crate::validator::Verdict;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Average word length used for WPM.
pub const AVERAGE_WORD_LEN: f64 = 4.7;

/// Summary of one finished (or in-progress) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Unix timestamp (seconds) when the snapshot was taken.
    pub finished_at: u64,
    /// Correct keystrokes as a percentage of all judged keystrokes.
    pub accuracy: f64,
    /// Words per minute.
    pub wpm: f64,
    /// Elapsed time in seconds.
    pub time: f64,
    /// Correct keystrokes.
    #[serde(default)]
    pub correct: u32,
    /// Incorrect keystrokes.
    #[serde(default)]
    pub errors: u32,
}

impl SessionStats {
    /// Compute stats for a session, stamped with the current wall clock.
    pub fn new(elapsed: Duration, correct: u32, errors: u32) -> Self {
        let finished_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self::at(finished_at, elapsed, correct, errors)
    }

    /// Compute stats with an explicit timestamp.
    ///
    /// No keystrokes or no elapsed time yields zeros instead of NaN.
    pub fn at(finished_at: u64, elapsed: Duration, correct: u32, errors: u32) -> Self {
        let total = f64::from(correct) + f64::from(errors);
        let seconds = elapsed.as_secs_f64();
        let minutes = seconds / 60.0;

        let accuracy = if total > 0.0 {
            f64::from(correct) / total * 100.0
        } else {
            0.0
        };
        let wpm = if minutes > 0.0 {
            (total / AVERAGE_WORD_LEN) / minutes
        } else {
            0.0
        };

        Self {
            finished_at,
            accuracy,
            wpm,
            time: seconds,
            correct,
            errors,
        }
    }
}

/// Counts verdicts and times the session.
///
/// Implements [`SessionObserver`], so the lifecycle drives it directly.
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    correct: u32,
    errors: u32,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl StatsTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Correct keystrokes so far.
    pub const fn correct(&self) -> u32 {
        self.correct
    }

    /// Incorrect keystrokes so far.
    pub const fn errors(&self) -> u32 {
        self.errors
    }

    /// Whether the timer is running.
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Clear counters and timer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Time between start and end (or `now` while running).
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at.map_or(Duration::ZERO, |start| {
            self.ended_at.unwrap_or(now).saturating_duration_since(start)
        })
    }

    /// Stats as of now.
    pub fn snapshot(&self) -> SessionStats {
        SessionStats::new(self.elapsed(Instant::now()), self.correct, self.errors)
    }
}

impl SessionObserver for StatsTracker {
    fn on_session_start(&mut self) {
        self.correct = 0;
        self.errors = 0;
        self.started_at = Some(Instant::now());
        self.ended_at = None;
    }

    fn on_session_end(&mut self) {
        if self.ended_at.is_none() {
            self.ended_at = Some(Instant::now());
        }
    }

    fn on_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Correct => self.correct += 1,
            Verdict::Incorrect => self.errors += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_formula() {
        // 47 keystrokes = 10 words, in 30 seconds = 20 wpm
        let stats = SessionStats::at(0, Duration::from_secs(30), 40, 7);
        assert!((stats.wpm - 20.0).abs() < 1e-9);
        assert!((stats.accuracy - 40.0 / 47.0 * 100.0).abs() < 1e-9);
        assert!((stats.time - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_zero_division() {
        let stats = SessionStats::at(0, Duration::ZERO, 0, 0);
        assert!(stats.wpm.abs() < f64::EPSILON);
        assert!(stats.accuracy.abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_counts_and_resets() {
        let mut tracker = StatsTracker::new();
        tracker.on_session_start();
        tracker.on_verdict(Verdict::Correct);
        tracker.on_verdict(Verdict::Correct);
        tracker.on_verdict(Verdict::Incorrect);
        assert_eq!((tracker.correct(), tracker.errors()), (2, 1));
        assert!(tracker.is_running());

        tracker.on_session_end();
        assert!(!tracker.is_running());

        tracker.on_session_start();
        assert_eq!((tracker.correct(), tracker.errors()), (0, 0));
    }

    #[test]
    fn test_elapsed_freezes_on_end() {
        let mut tracker = StatsTracker::new();
        assert_eq!(tracker.elapsed(Instant::now()), Duration::ZERO);

        tracker.on_session_start();
        tracker.on_session_end();
        let frozen = tracker.elapsed(Instant::now());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(tracker.elapsed(Instant::now()), frozen);
    }
}
