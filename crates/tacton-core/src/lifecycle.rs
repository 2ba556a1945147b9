//! Gesture lifecycle flags and edge-triggered notifications.
//!
//! Every gesture shares one four-flag lifecycle. Each flag notifies
//! registered observers exactly once per false→true edge; a true→true set is
//! silent. The dispatcher's cancellation path relies on this contract: it
//! forces `end` and the `Ended` notification fires if and only if the
//! gesture had actually started.

use crate::geometry::{Direction, Point};
use log::trace;

/// Snapshot of the four lifecycle flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleFlags {
    /// The required touch signature has been acquired.
    pub started: bool,
    /// Two-point gestures only: the tracked pair is locked in.
    pub activated: bool,
    /// The gesture has ended, with or without completing.
    pub ended: bool,
    /// The completion criteria were met at least once this activation.
    pub completed: bool,
}

/// Which flag edge a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Started,
    Activated,
    Ended,
    Completed,
}

/// Notification delivered to observers on each flag edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    /// The edge that fired.
    pub phase: GesturePhase,
    /// Flag snapshot after the transition.
    pub flags: LifecycleFlags,
    /// Origin position, for positional gestures.
    pub origin: Option<Point>,
    /// Configured direction, for swipe/pan.
    pub direction: Option<Direction>,
}

/// Observer callback. Registered once, invoked on every edge.
pub type LifecycleObserver = Box<dyn FnMut(&GestureEvent)>;

/// The shared lifecycle state machine embedded in every gesture.
///
/// Transition rules:
/// - `start` re-arms `ended` and `completed` for the new activation.
/// - `end` resets `started` and `activated`.
/// - `rearm_completed` silently clears `completed` so continuous gestures
///   (pan, pinch, rotate) can complete repeatedly within one activation.
#[derive(Default)]
pub struct Lifecycle {
    flags: LifecycleFlags,
    origin: Option<Point>,
    direction: Option<Direction>,
    observers: Vec<LifecycleObserver>,
}

impl Lifecycle {
    /// Create an idle lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for all subsequent edges.
    pub fn observe(&mut self, observer: LifecycleObserver) {
        self.observers.push(observer);
    }

    /// Current flag snapshot.
    #[must_use]
    pub fn flags(&self) -> LifecycleFlags {
        self.flags
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.flags.started
    }

    #[must_use]
    pub fn activated(&self) -> bool {
        self.flags.activated
    }

    #[must_use]
    pub fn ended(&self) -> bool {
        self.flags.ended
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.flags.completed
    }

    /// Set the origin payload carried by subsequent notifications.
    pub fn set_origin(&mut self, origin: Option<Point>) {
        self.origin = origin;
    }

    /// Set the direction payload carried by subsequent notifications.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction;
    }

    /// Transition to started. Silent if already started.
    pub fn start(&mut self) {
        if self.flags.started {
            return;
        }
        self.flags.started = true;
        self.flags.ended = false;
        self.flags.completed = false;
        trace!("lifecycle: started");
        self.notify(GesturePhase::Started);
    }

    /// Transition to activated. Silent if already activated.
    pub fn activate(&mut self) {
        if self.flags.activated {
            return;
        }
        self.flags.activated = true;
        trace!("lifecycle: activated");
        self.notify(GesturePhase::Activated);
    }

    /// Mark completion criteria met. Silent if already completed.
    pub fn complete(&mut self) {
        if self.flags.completed {
            return;
        }
        self.flags.completed = true;
        trace!("lifecycle: completed");
        self.notify(GesturePhase::Completed);
    }

    /// Transition to ended; resets `started` and `activated`. Silent if
    /// already ended.
    pub fn end(&mut self) {
        if self.flags.ended {
            return;
        }
        self.flags.ended = true;
        self.flags.started = false;
        self.flags.activated = false;
        trace!("lifecycle: ended");
        self.notify(GesturePhase::Ended);
    }

    /// Clear `completed` without notifying, so the next `complete` fires
    /// again. Used by continuous gestures between repeat ticks.
    pub fn rearm_completed(&mut self) {
        self.flags.completed = false;
    }

    fn notify(&mut self, phase: GesturePhase) {
        let event = GestureEvent {
            phase,
            flags: self.flags,
            origin: self.origin,
            direction: self.direction,
        };
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("flags", &self.flags)
            .field("origin", &self.origin)
            .field("direction", &self.direction)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (Lifecycle, Rc<RefCell<Vec<GestureEvent>>>) {
        let mut lifecycle = Lifecycle::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        lifecycle.observe(Box::new(move |e| sink.borrow_mut().push(*e)));
        (lifecycle, events)
    }

    fn phases(events: &Rc<RefCell<Vec<GestureEvent>>>) -> Vec<GesturePhase> {
        events.borrow().iter().map(|e| e.phase).collect()
    }

    #[test]
    fn test_start_fires_once() {
        let (mut lc, events) = recording();
        lc.start();
        lc.start();
        assert_eq!(phases(&events), vec![GesturePhase::Started]);
        assert!(lc.started());
    }

    #[test]
    fn test_end_resets_started_and_activated() {
        let (mut lc, events) = recording();
        lc.start();
        lc.activate();
        lc.end();
        assert!(!lc.started());
        assert!(!lc.activated());
        assert!(lc.ended());
        assert_eq!(
            phases(&events),
            vec![
                GesturePhase::Started,
                GesturePhase::Activated,
                GesturePhase::Ended
            ]
        );
    }

    #[test]
    fn test_end_fires_once() {
        let (mut lc, events) = recording();
        lc.start();
        lc.end();
        lc.end();
        let ended = phases(&events)
            .iter()
            .filter(|p| **p == GesturePhase::Ended)
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_completion_also_ends_keeps_both_flags() {
        let (mut lc, _) = recording();
        lc.start();
        lc.complete();
        lc.end();
        // Completed and ended are not mutually exclusive.
        assert!(lc.completed());
        assert!(lc.ended());
        assert!(!lc.started());
    }

    #[test]
    fn test_restart_rearms_ended_and_completed() {
        let (mut lc, events) = recording();
        lc.start();
        lc.complete();
        lc.end();
        lc.start();
        assert!(!lc.ended());
        assert!(!lc.completed());
        lc.complete();
        lc.end();
        let completed = phases(&events)
            .iter()
            .filter(|p| **p == GesturePhase::Completed)
            .count();
        assert_eq!(completed, 2);
    }

    #[test]
    fn test_rearm_completed_is_silent() {
        let (mut lc, events) = recording();
        lc.start();
        lc.complete();
        lc.rearm_completed();
        assert_eq!(events.borrow().len(), 2);
        lc.complete();
        let completed = phases(&events)
            .iter()
            .filter(|p| **p == GesturePhase::Completed)
            .count();
        assert_eq!(completed, 2);
    }

    #[test]
    fn test_end_without_start_still_notifies_edge() {
        // `ended` is itself edge-triggered; a fresh lifecycle ending fires
        // once. Gestures guard this with their own started check.
        let (mut lc, events) = recording();
        lc.end();
        assert_eq!(phases(&events), vec![GesturePhase::Ended]);
    }

    #[test]
    fn test_event_carries_flag_snapshot() {
        let (mut lc, events) = recording();
        lc.start();
        let event = events.borrow()[0];
        assert!(event.flags.started);
        assert!(!event.flags.ended);
    }

    #[test]
    fn test_event_carries_payload() {
        let (mut lc, events) = recording();
        lc.set_origin(Some(Point::new(3.0, 4.0)));
        lc.set_direction(Some(Direction::Up));
        lc.start();
        let event = events.borrow()[0];
        assert_eq!(event.origin, Some(Point::new(3.0, 4.0)));
        assert_eq!(event.direction, Some(Direction::Up));
    }

    #[test]
    fn test_multiple_observers_all_notified() {
        let mut lc = Lifecycle::new();
        let a = Rc::new(RefCell::new(0));
        let b = Rc::new(RefCell::new(0));
        let (ca, cb) = (Rc::clone(&a), Rc::clone(&b));
        lc.observe(Box::new(move |_| *ca.borrow_mut() += 1));
        lc.observe(Box::new(move |_| *cb.borrow_mut() += 1));
        lc.start();
        assert_eq!(*a.borrow(), 1);
        assert_eq!(*b.borrow(), 1);
    }
}
