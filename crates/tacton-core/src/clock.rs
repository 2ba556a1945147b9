//! Injected monotonic time source.
//!
//! Deadline and dwell checks sample the clock at `on_input` time, so gesture
//! timing resolution is bounded by the input frame rate. Injecting the clock
//! keeps deadline logic deterministically testable without real sleeps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source. Returns elapsed time since an arbitrary epoch;
/// only differences between samples are meaningful.
pub trait Clock {
    /// Current monotonic time.
    fn now(&self) -> Duration;
}

/// Wall-clock backed [`Clock`], anchored at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Create a clock anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Manually advanced [`Clock`] for tests.
///
/// Cloning shares the underlying time cell, so a test can hold one handle
/// while the gesture under test holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Advance the clock by whole milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Shared clock handle as held by gestures.
///
/// Processing is strictly single-threaded (one `on_input` at a time), so a
/// plain `Rc` is sufficient.
pub type SharedClock = Rc<dyn Clock>;
