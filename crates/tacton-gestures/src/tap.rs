//! Tap and hold: discrete N-touch press/release gestures.

use crate::config::{ConfigError, TapConfig};
use crate::gesture::Gesture;
use log::trace;
use std::time::Duration;
use tacton_core::{
    BindingScheduler, Lifecycle, SharedBinding, SharedClock, TouchFrame, TouchId,
};

/// Discrete gesture completed by a coordinated press and release of exactly
/// N touch points within a deadline.
///
/// In hold mode (`hold_threshold_ms` set) completion additionally requires
/// that, once the first release is observed, every remaining point is
/// released within the hold threshold of that first release.
pub struct TapGesture {
    config: TapConfig,
    deadline: Duration,
    hold_threshold: Option<Duration>,
    clock: SharedClock,
    scheduler: BindingScheduler,
    binding: Option<SharedBinding>,
    lifecycle: Lifecycle,
    /// Touch ids captured at the moment of starting; the sole basis for
    /// release and identity checks afterwards.
    activating: Vec<TouchId>,
    started_at: Duration,
    first_release_at: Option<Duration>,
    previous_released: usize,
    invalid: bool,
}

impl TapGesture {
    /// Create a tap (or hold) from validated configuration.
    pub fn new(
        config: TapConfig,
        clock: SharedClock,
        scheduler: BindingScheduler,
        binding: Option<SharedBinding>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            deadline: Duration::from_millis(config.deadline_ms),
            hold_threshold: config.hold_threshold_ms.map(Duration::from_millis),
            config,
            clock,
            scheduler,
            binding,
            lifecycle: Lifecycle::new(),
            activating: Vec::new(),
            started_at: Duration::ZERO,
            first_release_at: None,
            previous_released: 0,
            invalid: false,
        })
    }

    fn try_start(&mut self, frame: &TouchFrame) {
        let active = frame.active_count();
        // Over-count while idle latches the gesture invalid; only a full
        // release clears the latch and re-arms it.
        if active == 0 {
            self.invalid = false;
            return;
        }
        if active > self.config.touch_count {
            self.invalid = true;
        }
        if self.invalid {
            return;
        }
        // Start requires exactly the configured count, not fewer.
        if active != self.config.touch_count {
            return;
        }
        if !self.config.bounds.is_zero()
            && !frame
                .active()
                .all(|p| self.config.bounds.contains(&p.position))
        {
            // Out-of-bounds activation: the frame is ignored, no start.
            return;
        }
        self.activating = frame.active().map(|p| p.id).collect();
        self.started_at = self.clock.now();
        self.first_release_at = None;
        self.previous_released = 0;
        self.invalid = false;
        self.lifecycle
            .set_origin(frame.active().next().map(|p| p.position));
        self.lifecycle.start();
    }

    fn track(&mut self, frame: &TouchFrame) {
        let now = self.clock.now();

        // Extra fingers always cancel a tap.
        if frame.active_count() > self.config.touch_count {
            self.invalid = true;
        }
        // A non-activating id appearing invalidates immediately. An
        // activating id re-pressing is not caught here; only the release
        // count regression below flags it.
        if frame
            .active()
            .any(|p| !self.activating.contains(&p.id))
        {
            self.invalid = true;
        }
        // A tracked point leaving restricted bounds invalidates.
        if !self.config.bounds.is_zero()
            && frame
                .active()
                .filter(|p| self.activating.contains(&p.id))
                .any(|p| !self.config.bounds.contains(&p.position))
        {
            self.invalid = true;
        }

        let released = self
            .activating
            .iter()
            .filter(|id| frame.find(**id).is_none())
            .count();
        if released < self.previous_released {
            trace!("tap: release count regressed ({} -> {released})", self.previous_released);
            self.invalid = true;
        }

        if now.saturating_sub(self.started_at) > self.deadline {
            self.invalid = true;
        }

        if let Some(hold) = self.hold_threshold {
            if released > 0 && self.first_release_at.is_none() {
                self.first_release_at = Some(now);
            }
            // Enforced on every frame, including the full-release frame: a
            // straggler observed only after the dwell window still misses it.
            if let Some(first) = self.first_release_at {
                if now.saturating_sub(first) > hold {
                    self.invalid = true;
                }
            }
        }

        self.previous_released = released;

        if released == self.activating.len() {
            if !self.invalid {
                self.lifecycle.complete();
                if let Some(binding) = &self.binding {
                    self.scheduler.fire(binding);
                }
            }
            self.finish();
        }
    }

    // Shared end path for natural termination and dispatcher cancellation.
    fn finish(&mut self) {
        self.activating.clear();
        self.first_release_at = None;
        self.previous_released = 0;
        // The idle path re-latches invalid if fingers are still down.
        self.invalid = false;
        self.lifecycle.end();
    }
}

impl Gesture for TapGesture {
    fn on_input(&mut self, frame: &TouchFrame) {
        if self.lifecycle.started() {
            self.track(frame);
        } else {
            self.try_start(frame);
        }
    }

    fn cancel(&mut self) {
        if self.lifecycle.started() {
            self.finish();
        }
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn required_touches(&self) -> usize {
        self.config.touch_count
    }

    fn is_conflicting(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for TapGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapGesture")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("activating", &self.activating)
            .field("invalid", &self.invalid)
            .finish()
    }
}
