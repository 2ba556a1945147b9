//! Core types for the Tacton gesture engine.
//!
//! This crate provides the primitives shared by every gesture state machine:
//! - Geometry: [`Point`], [`Bounds`], [`Direction`]
//! - Per-frame input: [`TouchId`], [`TouchPoint`], [`TouchFrame`]
//! - Time: the injected [`Clock`] abstraction
//! - Lifecycle: the edge-triggered four-flag [`Lifecycle`] machine
//! - Bindings: the opaque press/release [`Binding`] contract and its dwell
//!   scheduler

mod binding;
mod clock;
mod frame;
mod geometry;
mod lifecycle;

pub use binding::{Binding, BindingScheduler, SharedBinding, PRESS_DWELL};
pub use clock::{Clock, ManualClock, MonotonicClock, SharedClock};
pub use frame::{TouchFrame, TouchId, TouchPoint};
pub use geometry::{Bounds, Direction, Point};
pub use lifecycle::{GestureEvent, GesturePhase, Lifecycle, LifecycleFlags, LifecycleObserver};
