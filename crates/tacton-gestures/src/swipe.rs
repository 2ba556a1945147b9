//! Swipe and pan: continuous single-point displacement gestures.

use crate::config::{ConfigError, SwipeConfig};
use crate::gesture::Gesture;
use log::trace;
use std::time::Duration;
use tacton_core::{
    BindingScheduler, Lifecycle, Point, SharedBinding, SharedClock, TouchFrame, TouchId,
};

/// Continuous gesture completed by single-point displacement past a
/// directional threshold. Tracks exactly slot 0.
///
/// In pan mode completion is a repeatable one-shot: the origin resets to the
/// current position and tracking continues, so the trigger can fire again
/// each time the displacement re-crosses the threshold.
pub struct SwipeGesture {
    config: SwipeConfig,
    deadline: Duration,
    clock: SharedClock,
    scheduler: BindingScheduler,
    binding: Option<SharedBinding>,
    lifecycle: Lifecycle,
    origin: Option<Point>,
    tracked: Option<TouchId>,
    started_at: Duration,
}

impl SwipeGesture {
    /// Create a swipe (or pan) from validated configuration.
    pub fn new(
        config: SwipeConfig,
        clock: SharedClock,
        scheduler: BindingScheduler,
        binding: Option<SharedBinding>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut lifecycle = Lifecycle::new();
        lifecycle.set_direction(Some(config.direction));
        Ok(Self {
            deadline: Duration::from_millis(config.deadline_ms),
            config,
            clock,
            scheduler,
            binding,
            lifecycle,
            origin: None,
            tracked: None,
            started_at: Duration::ZERO,
        })
    }

    fn try_start(&mut self, frame: &TouchFrame) {
        let Some(point) = frame.slot(0) else {
            return;
        };
        // Bounds are an entry gate only; later movement is unconstrained.
        if !self.config.bounds.is_zero() && !self.config.bounds.contains(&point.position) {
            return;
        }
        self.origin = Some(point.position);
        self.tracked = Some(point.id);
        self.started_at = self.clock.now();
        self.lifecycle.set_origin(Some(point.position));
        self.lifecycle.start();
    }

    fn track(&mut self, frame: &TouchFrame) {
        let point = match frame.slot(0) {
            // Release before the threshold cancels.
            None => {
                self.finish();
                return;
            }
            Some(p) => *p,
        };
        if self.tracked != Some(point.id) {
            // The tracked finger lifted and a different contact took the
            // slot over within one frame.
            self.finish();
            return;
        }

        if self.clock.now().saturating_sub(self.started_at) > self.deadline {
            self.finish();
            return;
        }

        let Some(origin) = self.origin else {
            return;
        };
        let delta = point.position - origin;
        if self.config.direction.crossed(delta, self.config.threshold) {
            trace!("swipe: threshold crossed towards {}", self.config.direction);
            self.lifecycle.complete();
            if let Some(binding) = &self.binding {
                self.scheduler.fire(binding);
            }
            if self.config.pan {
                // Re-origin at the completion position and keep tracking.
                self.origin = Some(point.position);
                self.started_at = self.clock.now();
                self.lifecycle.rearm_completed();
            } else {
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        self.origin = None;
        self.tracked = None;
        self.lifecycle.end();
    }
}

impl Gesture for SwipeGesture {
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
        1
    }

    fn is_conflicting(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for SwipeGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeGesture")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("origin", &self.origin)
            .finish()
    }
}
