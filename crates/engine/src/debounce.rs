//! Deadline-based refresh debounce.
//!
//! Visible-range changes arrive in bursts while the user scrolls.
//! Instead of a timer thread, the debounce keeps a deadline that each
//! new event pushes forward; the host's tick polls it. Only a deadline
//! that survives the full delay fires.

use std::time::{Duration, Instant};

/// Cancellable, re-armable refresh deadline.
#[derive(Debug, Clone)]
pub struct RefreshDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RefreshDebounce {
    /// Create a debounce with the given quiet-period delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)arm the deadline. Cancels any pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire-once check: returns true exactly when a pending deadline
    /// has elapsed, clearing it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Update the delay (live reconfiguration). A pending deadline
    /// keeps its original schedule.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}
