//! Geometric primitives: `Point`, `Bounds`, `Direction`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates, in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Angle from `self` to `other` in degrees, 0..360.
    ///
    /// Measured counter-clockwise with the y axis inverted first, so the
    /// result matches a conventional mathematical angle even though screen
    /// coordinates grow downward.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = -(other.y - self.y);
        let mut degrees = dy.atan2(dx).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        degrees
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rotatable rectangular area used to restrict where a gesture may start.
///
/// The rectangle is axis-defined around `center`, extending ±width/2 and
/// ±height/2 before `rotation` (degrees, counter-clockwise) is applied.
/// The all-zero value is a sentinel meaning "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Width of the area before rotation.
    pub width: f32,
    /// Height of the area before rotation.
    pub height: f32,
    /// Center of the area.
    pub center: Point,
    /// Rotation about the center, in degrees.
    pub rotation: f32,
}

impl Bounds {
    /// Unrestricted sentinel value.
    pub const NONE: Self = Self {
        width: 0.0,
        height: 0.0,
        center: Point::ORIGIN,
        rotation: 0.0,
    };

    /// Create a new bounds area.
    #[must_use]
    pub const fn new(width: f32, height: f32, center: Point, rotation: f32) -> Self {
        Self {
            width,
            height,
            center,
            rotation,
        }
    }

    /// True if every field is zero, meaning no bounds restriction applies.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.width == 0.0
            && self.height == 0.0
            && self.center == Point::ORIGIN
            && self.rotation == 0.0
    }

    /// Check whether a point lies inside the (possibly rotated) area.
    ///
    /// The point is rotated by the inverse of `rotation` about `center`,
    /// then tested against the centered axis-aligned rectangle. A zero
    /// bounds contains everything.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        if self.is_zero() {
            return true;
        }
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let (dx, dy) = if self.rotation == 0.0 {
            (dx, dy)
        } else {
            let theta = (-self.rotation).to_radians();
            let (sin, cos) = theta.sin_cos();
            (dx * cos - dy * sin, dx * sin + dy * cos)
        };
        dx.abs() <= self.width / 2.0 && dy.abs() <= self.height / 2.0
    }
}

/// One of the eight swipe directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All eight directions, for exhaustive tests.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Test whether a displacement has crossed the threshold in this
    /// direction.
    ///
    /// Screen coordinates: `Up` means negative y. Diagonal directions
    /// require both components to cross simultaneously.
    #[must_use]
    pub fn crossed(self, delta: Point, threshold: Point) -> bool {
        let up = delta.y <= -threshold.y;
        let down = delta.y >= threshold.y;
        let left = delta.x <= -threshold.x;
        let right = delta.x >= threshold.x;
        match self {
            Self::Up => up,
            Self::Down => down,
            Self::Left => left,
            Self::Right => right,
            Self::UpLeft => up && left,
            Self::UpRight => up && right,
            Self::DownLeft => down && left,
            Self::DownRight => down && right,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::UpLeft => "UpLeft",
            Self::UpRight => "UpRight",
            Self::DownLeft => "DownLeft",
            Self::DownRight => "DownRight",
        };
        write!(f, "{name}")
    }
}
