//! Debounce coalescing for snapshot bursts
//!
//! A single-slot pending snapshot with a deadline. Each push replaces the
//! pending value and restarts the quiet window, so a burst of subscription
//! notifications collapses into one reconciliation using only the latest
//! snapshot. The slot itself only does deadline arithmetic; the owner
//! supplies the timer by sleeping until [`DebounceSlot::deadline`].

use std::time::Duration;
use tokio::time::Instant;

/// One pending snapshot awaiting its quiet window
#[derive(Debug)]
pub struct DebounceSlot<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> DebounceSlot<T> {
    /// Create a slot with the given quiet window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Replace the pending snapshot and restart the quiet window
    ///
    /// A still-pending earlier snapshot is discarded; only the newest
    /// snapshot is reconciled.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.window);
    }

    /// Deadline of the pending snapshot, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a snapshot is waiting for its window to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Yield the pending snapshot if its quiet window has elapsed
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.take_now(),
            _ => None,
        }
    }

    /// Cancel the window and yield the pending snapshot immediately
    ///
    /// Used by manual triggers, which must not wait out (or run alongside)
    /// a pending automatic pass.
    pub fn take_now(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }
}
