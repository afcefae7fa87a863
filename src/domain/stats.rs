//! Diagnostic counters for a listener.
//!
//! [`ListenerStats`] is shared between the connection task and the owning
//! [`crate::listener::StreamListener`]. Counters are monotonic.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use super::MessageOutcome;

/// Live counters updated by the connection loop.
#[derive(Debug, Default)]
pub struct ListenerStats {
    frames_received: AtomicU64,
    rendered: AtomicU64,
    no_surface: AtomicU64,
    dropped: AtomicU64,
    render_failures: AtomicU64,
    ignored_frames: AtomicU64,
    last_message_at: Mutex<Option<DateTime<Utc>>>,
}

/// Point-in-time copy of [`ListenerStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Text frames handed to the message handler.
    pub frames_received: u64,
    /// Messages written to the display surface.
    pub rendered: u64,
    /// Messages handled while no surface was present.
    pub no_surface: u64,
    /// Messages dropped because they were not valid JSON.
    pub dropped: u64,
    /// Messages whose lookup or write failed.
    pub render_failures: u64,
    /// Binary frames skipped by the connection loop.
    pub ignored_frames: u64,
    /// Arrival time of the most recent text frame.
    pub last_message_at: Option<DateTime<Utc>>,
}

impl ListenerStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one handled text frame and its outcome.
    ///
    /// `frames_received` is bumped last: a reader that observes the new
    /// frame count also observes its outcome.
    pub fn record(&self, outcome: MessageOutcome) {
        *self.last_message_at.lock() = Some(Utc::now());
        let counter = match outcome {
            MessageOutcome::Rendered => &self.rendered,
            MessageOutcome::NoSurface => &self.no_surface,
            MessageOutcome::Dropped => &self.dropped,
            MessageOutcome::RenderFailed => &self.render_failures,
        };
        counter.fetch_add(1, Ordering::Release);
        self.frames_received.fetch_add(1, Ordering::Release);
    }

    /// Records a non-text frame that was skipped.
    pub fn record_ignored(&self) {
        self.ignored_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a copy of the current counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_received: self.frames_received.load(Ordering::Acquire),
            rendered: self.rendered.load(Ordering::Relaxed),
            no_surface: self.no_surface.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            render_failures: self.render_failures.load(Ordering::Relaxed),
            ignored_frames: self.ignored_frames.load(Ordering::Relaxed),
            last_message_at: *self.last_message_at.lock(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zero() {
        let stats = ListenerStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn record_counts_by_outcome() {
        let stats = ListenerStats::new();
        stats.record(MessageOutcome::Rendered);
        stats.record(MessageOutcome::Rendered);
        stats.record(MessageOutcome::NoSurface);
        stats.record(MessageOutcome::Dropped);
        stats.record(MessageOutcome::RenderFailed);
        stats.record_ignored();

        let snap = stats.snapshot();
        assert_eq!(snap.frames_received, 5);
        assert_eq!(snap.rendered, 2);
        assert_eq!(snap.no_surface, 1);
        assert_eq!(snap.dropped, 1);
        assert_eq!(snap.render_failures, 1);
        assert_eq!(snap.ignored_frames, 1);
        assert!(snap.last_message_at.is_some());
    }

    #[test]
    fn ignored_frames_do_not_touch_last_message() {
        let stats = ListenerStats::new();
        stats.record_ignored();
        let snap = stats.snapshot();
        assert_eq!(snap.frames_received, 0);
        assert!(snap.last_message_at.is_none());
    }
}
