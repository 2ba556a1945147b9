//! Multi-touch gesture recognition and arbitration for the Tacton engine.
//!
//! Each gesture type is an independent finite state machine driven by
//! per-frame touch reports ([`tacton_core::TouchFrame`]), with no buffering
//! and no lookahead:
//! - Tap and hold: [`TapGesture`], a discrete N-touch tap with an optional
//!   inner dwell deadline
//! - Swipe and pan: [`SwipeGesture`], single-point directional displacement,
//!   one-shot or repeating
//! - Pinch and rotate: [`PinchGesture`], a two-point gesture producing
//!   distance or angle completions
//!
//! The [`GestureDispatcher`] feeds every frame to every registered gesture
//! and arbitrates the conflicting tap/hold family so that only the most
//! specific signature can start per touch sequence. A [`Profile`] ties a
//! configured set of gestures to one clock, one binding scheduler, and one
//! device density scale.

mod config;
mod dispatcher;
mod gesture;
mod pinch;
mod profile;
mod swipe;
mod tap;

pub use config::{ConfigError, PinchConfig, SwipeConfig, TapConfig};
pub use dispatcher::GestureDispatcher;
pub use gesture::Gesture;
pub use pinch::{PinchGesture, PinchMode};
pub use profile::Profile;
pub use swipe::SwipeGesture;
pub use tap::TapGesture;
