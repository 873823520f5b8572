/// Monotonic clocks.
///
/// Timestamps are `Duration`s since the clock's own origin. Only
/// differences between two readings of the same clock are meaningful.
/// The culler uses them for debounce deadlines and run timing; the wall
/// material uses them for animation progress and render throttling.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic high-resolution time source.
pub trait Clock {
    /// Time elapsed since the clock origin. Never decreases.
    fn now(&self) -> Duration;
}

/// Clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced explicitly by the host (or by tests).
///
/// Clones share the same time, so a host can hand one copy to the culler
/// and keep another to drive it frame by frame.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// Jump to `time`. Earlier values are ignored to keep the clock monotonic.
    pub fn set(&self, time: Duration) {
        if time > self.now.get() {
            self.now.set(time);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
