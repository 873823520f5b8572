/// Debouncer: single-slot deadline for coalescing camera-change bursts.
///
/// `notify` replaces the pending deadline with `now + interval`; `poll`
/// reports the deadline once it has passed and empties the slot. A burst
/// of notifications therefore yields exactly one firing, `interval` after
/// the last notification. Missed firings are never queued.

use std::time::Duration;
use crate::error::{Result, Error};

/// Single pending deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Quiet time required before firing.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the quiet time. A pending deadline is not moved.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Cancel any pending deadline and schedule a new one at `now + interval`.
    ///
    /// # Errors
    ///
    /// `TimerError` if the deadline is not representable. The slot is left
    /// empty, so the next `notify` simply tries again.
    pub fn notify(&mut self, now: Duration) -> Result<()> {
        self.deadline = None;
        let deadline = now.checked_add(self.interval).ok_or_else(|| {
            Error::TimerError(format!(
                "deadline overflow scheduling {:?} after {:?}",
                self.interval, now
            ))
        })?;
        self.deadline = Some(deadline);
        Ok(())
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True while a deadline is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Return true exactly once when `now` has reached the pending deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
