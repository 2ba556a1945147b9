//! Pinch and rotate: the dual-mode two-point gesture.

use crate::config::{ConfigError, PinchConfig};
use crate::gesture::Gesture;
use log::trace;
use tacton_core::{BindingScheduler, Lifecycle, SharedBinding, TouchFrame, TouchId};

/// Which outcome a [`PinchGesture`] instance produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchMode {
    /// Pinch: accumulated pairwise-distance delta crosses the threshold.
    /// `inner` completes on contraction, otherwise on expansion.
    Distance { threshold: f32, inner: bool },
    /// Rotation: accumulated signed angle delta crosses the threshold.
    /// `clockwise` completes on positive accumulation, otherwise negative.
    Angle { threshold: f32, clockwise: bool },
}

impl PinchMode {
    fn from_config(config: &PinchConfig) -> Self {
        if config.distance_threshold > 0.0 {
            Self::Distance {
                threshold: config.distance_threshold,
                inner: config.inner,
            }
        } else {
            Self::Angle {
                threshold: config.angle_threshold,
                clockwise: config.clockwise,
            }
        }
    }
}

/// Two-point gesture producing either pinch or rotation completions.
///
/// Deltas accumulate across the whole activation; each completion resets
/// them to zero so one continuous two-finger motion can produce repeated
/// ticks. The gesture only fully ends once both points are released.
pub struct PinchGesture {
    config: PinchConfig,
    mode: PinchMode,
    scheduler: BindingScheduler,
    binding: Option<SharedBinding>,
    lifecycle: Lifecycle,
    pair: Option<[TouchId; 2]>,
    previous_distance: f32,
    previous_angle: f32,
    delta_distance: f32,
    delta_angle: f32,
    previous_released: usize,
    invalid: bool,
}

impl PinchGesture {
    /// Create a pinch/rotate from validated configuration.
    pub fn new(
        config: PinchConfig,
        scheduler: BindingScheduler,
        binding: Option<SharedBinding>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mode: PinchMode::from_config(&config),
            config,
            scheduler,
            binding,
            lifecycle: Lifecycle::new(),
            pair: None,
            previous_distance: 0.0,
            previous_angle: 0.0,
            delta_distance: 0.0,
            delta_angle: 0.0,
            previous_released: 0,
            invalid: false,
        })
    }

    /// The mode this instance resolved to.
    #[must_use]
    pub fn mode(&self) -> PinchMode {
        self.mode
    }

    fn try_start(&mut self, frame: &TouchFrame) {
        let active = frame.active_count();
        // More than two points latches invalid; the latch only clears on a
        // full release. Fewer than two stay idle.
        if active == 0 {
            self.invalid = false;
            return;
        }
        if active > 2 {
            self.invalid = true;
        }
        if self.invalid {
            return;
        }
        if active != 2 {
            return;
        }
        let mut active = frame.active();
        let (Some(first), Some(second)) = (active.next(), active.next()) else {
            return;
        };
        if !self.config.relative
            && !self.config.bounds.is_zero()
            && !(self.config.bounds.contains(&first.position)
                && self.config.bounds.contains(&second.position))
        {
            return;
        }
        self.pair = Some([first.id, second.id]);
        self.previous_distance = first.position.distance(&second.position);
        self.previous_angle = first.position.angle_to(&second.position);
        self.delta_distance = 0.0;
        self.delta_angle = 0.0;
        self.previous_released = 0;
        self.invalid = false;
        self.lifecycle
            .set_origin(Some(first.position.lerp(&second.position, 0.5)));
        self.lifecycle.start();
        self.lifecycle.activate();
    }

    fn track(&mut self, frame: &TouchFrame) {
        let Some(pair) = self.pair else {
            return;
        };

        if frame.active_count() > 2 {
            self.invalid = true;
        }
        if frame.active().any(|p| !pair.contains(&p.id)) {
            self.invalid = true;
        }

        let released = pair
            .iter()
            .filter(|id| frame.find(**id).is_none())
            .count();
        if released < self.previous_released {
            self.invalid = true;
        }
        self.previous_released = released;

        if released == 2 {
            self.finish();
            return;
        }
        if released == 1 || self.invalid {
            return;
        }

        let (Some(first), Some(second)) = (frame.find(pair[0]), frame.find(pair[1])) else {
            return;
        };
        let distance = first.position.distance(&second.position);
        let angle = first.position.angle_to(&second.position);
        self.delta_distance += distance - self.previous_distance;
        self.delta_angle += angle - self.previous_angle;
        self.previous_distance = distance;
        self.previous_angle = angle;

        let satisfied = match self.mode {
            PinchMode::Distance { threshold, inner } => {
                if inner {
                    self.delta_distance <= -threshold
                } else {
                    self.delta_distance >= threshold
                }
            }
            PinchMode::Angle {
                threshold,
                clockwise,
            } => {
                if clockwise {
                    self.delta_angle >= threshold
                } else {
                    self.delta_angle <= -threshold
                }
            }
        };
        if satisfied {
            trace!(
                "pinch: completion tick (distance {:+.2}, angle {:+.2})",
                self.delta_distance,
                self.delta_angle
            );
            self.lifecycle.complete();
            if let Some(binding) = &self.binding {
                self.scheduler.fire(binding);
            }
            // Repeated completions from one continuous motion: reset the
            // accumulators and re-arm.
            self.delta_distance = 0.0;
            self.delta_angle = 0.0;
            self.lifecycle.rearm_completed();
        }
    }

    fn finish(&mut self) {
        self.pair = None;
        self.delta_distance = 0.0;
        self.delta_angle = 0.0;
        self.previous_released = 0;
        // The idle path re-latches invalid if fingers are still down.
        self.invalid = false;
        self.lifecycle.end();
    }
}

impl Gesture for PinchGesture {
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
        2
    }

    fn is_conflicting(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for PinchGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinchGesture")
            .field("mode", &self.mode)
            .field("lifecycle", &self.lifecycle)
            .field("pair", &self.pair)
            .field("delta_distance", &self.delta_distance)
            .field("delta_angle", &self.delta_angle)
            .finish()
    }
}
