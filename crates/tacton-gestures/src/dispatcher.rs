//! Frame routing and arbitration between registered gestures.

use crate::gesture::Gesture;
use log::{debug, trace};
use tacton_core::TouchFrame;

/// Routes each input frame to every registered gesture and arbitrates the
/// conflicting ones.
///
/// Conflicting gestures (tap/hold variants) all react to "N fingers down",
/// so they are kept sorted by descending required touch count: the most
/// specific signature wins. On each frame, the first conflicting gesture
/// observed in the started state blocks every gesture after it in the order,
/// which is cancelled through its normal end path so its `Ended`
/// notification still fires. Non-conflicting gestures (swipe, pan, pinch,
/// rotate) are distinguished by motion rather than touch count and receive
/// every frame unconditionally.
#[derive(Default)]
pub struct GestureDispatcher {
    conflicting: Vec<Box<dyn Gesture>>,
    non_conflicting: Vec<Box<dyn Gesture>>,
}

impl GestureDispatcher {
    /// Create an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gesture. The conflict ordering is rebuilt synchronously;
    /// registration must not race frame dispatch.
    pub fn register(&mut self, gesture: Box<dyn Gesture>) {
        if gesture.is_conflicting() {
            debug!(
                "dispatcher: registering conflicting gesture ({} touches)",
                gesture.required_touches()
            );
            self.conflicting.push(gesture);
            // Stable sort keeps registration order among equal signatures.
            self.conflicting
                .sort_by(|a, b| b.required_touches().cmp(&a.required_touches()));
        } else {
            debug!("dispatcher: registering non-conflicting gesture");
            self.non_conflicting.push(gesture);
        }
    }

    /// Number of registered gestures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conflicting.len() + self.non_conflicting.len()
    }

    /// True if no gestures are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registered gesture. Used when the active profile
    /// changes.
    pub fn clear(&mut self) {
        self.conflicting.clear();
        self.non_conflicting.clear();
    }

    /// Feed one input frame to the registered gestures.
    pub fn on_frame(&mut self, frame: &TouchFrame) {
        for gesture in &mut self.non_conflicting {
            gesture.on_input(frame);
        }

        let mut blocked = false;
        for gesture in &mut self.conflicting {
            if blocked {
                if gesture.started() {
                    trace!(
                        "dispatcher: cancelling {}-touch gesture, higher priority gesture started",
                        gesture.required_touches()
                    );
                }
                gesture.cancel();
                continue;
            }
            gesture.on_input(frame);
            if gesture.started() {
                blocked = true;
            }
        }
    }

    /// The conflicting gestures in arbitration order. For observation in
    /// tests and tooling.
    #[must_use]
    pub fn conflicting(&self) -> &[Box<dyn Gesture>] {
        &self.conflicting
    }

    /// The non-conflicting gestures in registration order.
    #[must_use]
    pub fn non_conflicting(&self) -> &[Box<dyn Gesture>] {
        &self.non_conflicting
    }
}

impl std::fmt::Debug for GestureDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDispatcher")
            .field("conflicting", &self.conflicting.len())
            .field("non_conflicting", &self.non_conflicting.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SwipeConfig, TapConfig};
    use crate::swipe::SwipeGesture;
    use crate::tap::TapGesture;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tacton_core::{
        BindingScheduler, GesturePhase, ManualClock, Point, TouchFrame, TouchId, TouchPoint,
    };

    fn pt(id: u64, x: f32, y: f32) -> TouchPoint {
        TouchPoint::new(TouchId::new(id), Point::new(x, y))
    }

    fn tap_with_log(
        touch_count: usize,
        clock: &ManualClock,
        log: &Rc<RefCell<Vec<(usize, GesturePhase)>>>,
    ) -> Box<TapGesture> {
        let config = TapConfig {
            touch_count,
            ..Default::default()
        };
        let mut gesture = TapGesture::new(
            config,
            Rc::new(clock.clone()),
            BindingScheduler::inline(),
            None,
        )
        .unwrap();
        let sink = Rc::clone(log);
        gesture
            .lifecycle_mut()
            .observe(Box::new(move |e| sink.borrow_mut().push((touch_count, e.phase))));
        Box::new(gesture)
    }

    #[test]
    fn test_conflicting_sorted_descending() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(1, &clock, &log));
        dispatcher.register(tap_with_log(3, &clock, &log));
        dispatcher.register(tap_with_log(2, &clock, &log));

        let counts: Vec<_> = dispatcher
            .conflicting()
            .iter()
            .map(|g| g.required_touches())
            .collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn test_two_touch_tap_beats_one_touch_tap() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(1, &clock, &log));
        dispatcher.register(tap_with_log(2, &clock, &log));

        // First finger lands: the 1-touch tap starts.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![Some(pt(1, 0.0, 0.0)), None]));
        assert_eq!(log.borrow().as_slice(), &[(1, GesturePhase::Started)]);

        // Second finger lands: the 2-touch tap starts and the 1-touch tap
        // is force-ended on the same frame.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![
            Some(pt(1, 0.0, 0.0)),
            Some(pt(2, 5.0, 5.0)),
        ]));
        {
            let log = log.borrow();
            assert!(log.contains(&(2, GesturePhase::Started)));
            assert!(log.contains(&(1, GesturePhase::Ended)));
        }

        // Full release: only the 2-touch tap completes.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![None, None]));
        let log = log.borrow();
        assert!(log.contains(&(2, GesturePhase::Completed)));
        assert!(!log.contains(&(1, GesturePhase::Completed)));
    }

    #[test]
    fn test_loser_cannot_restart_while_winner_holds() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(1, &clock, &log));
        dispatcher.register(tap_with_log(2, &clock, &log));

        dispatcher.on_frame(&TouchFrame::from_slots(vec![
            Some(pt(1, 0.0, 0.0)),
            Some(pt(2, 5.0, 5.0)),
        ]));
        log.borrow_mut().clear();

        // While the 2-touch tap stays started, later frames never restart
        // the 1-touch tap.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![
            Some(pt(1, 0.0, 0.0)),
            Some(pt(2, 5.0, 5.0)),
        ]));
        assert!(!log.borrow().contains(&(1, GesturePhase::Started)));
    }

    #[test]
    fn test_cancel_only_fires_ended_for_started_losers() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(2, &clock, &log));
        dispatcher.register(tap_with_log(1, &clock, &log));

        // Two fingers land at once: the 2-touch tap starts; the idle
        // 1-touch tap is cancelled silently.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![
            Some(pt(1, 0.0, 0.0)),
            Some(pt(2, 5.0, 5.0)),
        ]));
        let log = log.borrow();
        assert!(log.contains(&(2, GesturePhase::Started)));
        assert!(!log.iter().any(|(count, _)| *count == 1));
    }

    #[test]
    fn test_non_conflicting_receive_every_frame() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(1, &clock, &log));

        let swipe_log = Rc::new(RefCell::new(Vec::new()));
        let mut swipe = SwipeGesture::new(
            SwipeConfig::default(),
            Rc::new(clock.clone()),
            BindingScheduler::inline(),
            None,
        )
        .unwrap();
        let sink = Rc::clone(&swipe_log);
        swipe
            .lifecycle_mut()
            .observe(Box::new(move |e| sink.borrow_mut().push(e.phase)));
        dispatcher.register(Box::new(swipe));

        // The tap starts and would block later conflicting gestures, but
        // the swipe still sees the frame and starts too.
        dispatcher.on_frame(&TouchFrame::from_slots(vec![Some(pt(1, 0.0, 0.0))]));
        assert!(log.borrow().contains(&(1, GesturePhase::Started)));
        assert!(swipe_log.borrow().contains(&GesturePhase::Started));
    }

    #[test]
    fn test_clear_empties_dispatcher() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = GestureDispatcher::new();
        dispatcher.register(tap_with_log(1, &clock, &log));
        assert_eq!(dispatcher.len(), 1);
        assert!(!dispatcher.is_empty());

        dispatcher.clear();
        assert!(dispatcher.is_empty());
    }
}
