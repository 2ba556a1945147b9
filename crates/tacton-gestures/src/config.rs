//! Per-gesture configuration.
//!
//! Configuration is constructed elsewhere (persisted profiles, a remote UI)
//! and handed in here; these types are the boundary contract. Validation is
//! eager: malformed configuration is rejected at construction time so the
//! per-frame hot path never has to handle it.

use serde::{Deserialize, Serialize};
use tacton_core::{Bounds, Direction, Point};
use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("required touch count must be at least 1")]
    ZeroTouchCount,
    #[error("deadline must be positive")]
    ZeroDeadline,
    #[error("hold threshold must be positive")]
    ZeroHoldThreshold,
    #[error("swipe threshold must be positive on every axis tested by the direction")]
    SwipeThreshold,
    #[error("exactly one of distance and angle threshold must be positive")]
    PinchMode,
}

/// Configuration for a tap, or a hold when `hold_threshold_ms` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapConfig {
    /// Area the activating points must start in; zero means unrestricted.
    pub bounds: Bounds,
    /// Maximum elapsed time from start before forced invalidation.
    pub deadline_ms: u64,
    /// Exact number of simultaneous touches required to start.
    pub touch_count: usize,
    /// Hold mode: once the first release is observed, every remaining point
    /// must be released within this many milliseconds.
    pub hold_threshold_ms: Option<u64>,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::NONE,
            deadline_ms: 300,
            touch_count: 1,
            hold_threshold_ms: None,
        }
    }
}

impl TapConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch_count == 0 {
            return Err(ConfigError::ZeroTouchCount);
        }
        if self.deadline_ms == 0 {
            return Err(ConfigError::ZeroDeadline);
        }
        if self.hold_threshold_ms == Some(0) {
            return Err(ConfigError::ZeroHoldThreshold);
        }
        Ok(())
    }
}

/// Configuration for a swipe, or a pan when `pan` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Displacement the tracked point must cross, per axis.
    pub threshold: Point,
    /// Maximum elapsed time from start before the gesture ends.
    pub deadline_ms: u64,
    /// Direction the displacement is tested against.
    pub direction: Direction,
    /// Area the origin must lie in (entry gate only); zero means
    /// unrestricted.
    pub bounds: Bounds,
    /// Pan mode: completion re-origins at the current position and keeps
    /// tracking instead of ending.
    pub pan: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: Point::new(30.0, 30.0),
            deadline_ms: 500,
            direction: Direction::Up,
            bounds: Bounds::NONE,
            pan: false,
        }
    }
}

impl SwipeConfig {
    /// Validate the configuration. The threshold must be positive on every
    /// axis the configured direction tests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deadline_ms == 0 {
            return Err(ConfigError::ZeroDeadline);
        }
        let needs_x = matches!(
            self.direction,
            Direction::Left
                | Direction::Right
                | Direction::UpLeft
                | Direction::UpRight
                | Direction::DownLeft
                | Direction::DownRight
        );
        let needs_y = matches!(
            self.direction,
            Direction::Up
                | Direction::Down
                | Direction::UpLeft
                | Direction::UpRight
                | Direction::DownLeft
                | Direction::DownRight
        );
        if (needs_x && self.threshold.x <= 0.0) || (needs_y && self.threshold.y <= 0.0) {
            return Err(ConfigError::SwipeThreshold);
        }
        Ok(())
    }

    /// Apply the device density scale to the raw threshold.
    #[must_use]
    pub fn scaled(mut self, lines_per_mm: f32) -> Self {
        self.threshold = Point::new(
            self.threshold.x * lines_per_mm,
            self.threshold.y * lines_per_mm,
        );
        self
    }
}

/// Configuration for the dual-mode two-point gesture.
///
/// Exactly one of `distance_threshold` and `angle_threshold` is meaningful:
/// a positive distance threshold selects pinch mode, otherwise a positive
/// angle threshold selects rotation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinchConfig {
    /// Accumulated pairwise-distance delta to cross, in lines. Positive
    /// selects pinch mode.
    pub distance_threshold: f32,
    /// Accumulated signed angle delta to cross, in degrees. Used when
    /// `distance_threshold` is zero.
    pub angle_threshold: f32,
    /// Pinch mode: true completes on contraction, false on expansion.
    pub inner: bool,
    /// Rotation mode: true completes on clockwise accumulation, false on
    /// counter-clockwise.
    pub clockwise: bool,
    /// Relative mode skips the bounds entry gate.
    pub relative: bool,
    /// Area both points must start in; zero means unrestricted.
    pub bounds: Bounds,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 10.0,
            angle_threshold: 0.0,
            inner: false,
            clockwise: true,
            relative: false,
            bounds: Bounds::NONE,
        }
    }
}

impl PinchConfig {
    /// Validate the configuration: exactly one mode threshold positive,
    /// neither negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distance = self.distance_threshold > 0.0;
        let angle = self.angle_threshold > 0.0;
        if distance == angle || self.distance_threshold < 0.0 || self.angle_threshold < 0.0 {
            return Err(ConfigError::PinchMode);
        }
        Ok(())
    }

    /// Apply the device density scale to the raw distance threshold. The
    /// angle threshold is density-independent.
    #[must_use]
    pub fn scaled(mut self, lines_per_mm: f32) -> Self {
        self.distance_threshold *= lines_per_mm;
        self
    }
}
