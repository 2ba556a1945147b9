//! The shared gesture contract.

use tacton_core::{Lifecycle, TouchFrame};

/// A gesture state machine driven by per-frame touch reports.
///
/// `on_input` must be called once per input frame, in frame order, with no
/// frame skipped or replayed; the machines are not idempotent and have no
/// resume semantics. All mutation happens inside that call.
pub trait Gesture {
    /// Feed one frame of input.
    fn on_input(&mut self, frame: &TouchFrame);

    /// Force the gesture to end through the same path as natural
    /// termination, so its `Ended` notification fires if it had started.
    /// Used by the dispatcher to cancel a lower-priority gesture.
    fn cancel(&mut self);

    /// Lifecycle flags and observer registry.
    fn lifecycle(&self) -> &Lifecycle;

    /// Mutable lifecycle access, for observer registration.
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Number of simultaneous touches this gesture's signature requires.
    fn required_touches(&self) -> usize;

    /// Conflicting gestures (tap/hold variants) react to the same
    /// touch-count signature and are arbitrated; non-conflicting gestures
    /// (swipe/pan/pinch/rotate) receive every frame unconditionally.
    fn is_conflicting(&self) -> bool;

    /// Whether the gesture is currently started.
    fn started(&self) -> bool {
        self.lifecycle().started()
    }
}
