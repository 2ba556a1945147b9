//! Per-frame touch input: `TouchId`, `TouchPoint`, `TouchFrame`.
//!
//! The host input pipeline delivers one [`TouchFrame`] per input frame: a
//! fixed-capacity ordered slot array where an empty slot means that finger is
//! currently lifted. Slot indices carry no identity across frames; only
//! [`TouchId`] does.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Stable identifier of a touch contact.
///
/// The id stays constant for as long as a finger remains down and is the
/// only valid way to correlate a contact across frames. Position must never
/// be used for correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchId(pub u64);

impl TouchId {
    /// Create a new touch id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A single touch contact reported in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Stable contact identifier.
    pub id: TouchId,
    /// Contact position for this frame.
    pub position: Point,
}

impl TouchPoint {
    /// Create a new touch point.
    #[must_use]
    pub const fn new(id: TouchId, position: Point) -> Self {
        Self { id, position }
    }
}

/// One frame of touch input: an ordered slot array of optional contacts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchFrame {
    slots: Vec<Option<TouchPoint>>,
}

impl TouchFrame {
    /// Create an empty frame with the given slot capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Build a frame directly from slots; mainly used by tests and by hosts
    /// that already hold a slot array.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<TouchPoint>>) -> Self {
        Self { slots }
    }

    /// Number of slots (lifted or not).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The contact in a slot, if one is down.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&TouchPoint> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Place a contact in a slot, growing the array if needed.
    pub fn press(&mut self, index: usize, point: TouchPoint) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(point);
    }

    /// Empty a slot (finger lifted).
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Iterate over the contacts that are down this frame.
    pub fn active(&self) -> impl Iterator<Item = &TouchPoint> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Number of contacts down this frame.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Find an active contact by id.
    #[must_use]
    pub fn find(&self, id: TouchId) -> Option<&TouchPoint> {
        self.active().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(id: u64, x: f32, y: f32) -> TouchPoint {
        TouchPoint::new(TouchId::new(id), Point::new(x, y))
    }

    #[test]
    fn test_empty_frame() {
        let frame = TouchFrame::new(10);
        assert_eq!(frame.capacity(), 10);
        assert_eq!(frame.active_count(), 0);
        assert!(frame.slot(0).is_none());
    }

    #[test]
    fn test_press_and_release() {
        let mut frame = TouchFrame::new(2);
        frame.press(0, pt(7, 10.0, 20.0));
        assert_eq!(frame.active_count(), 1);
        assert_eq!(frame.slot(0).unwrap().id, TouchId(7));

        frame.release(0);
        assert_eq!(frame.active_count(), 0);
    }

    #[test]
    fn test_press_grows_slot_array() {
        let mut frame = TouchFrame::new(1);
        frame.press(4, pt(1, 0.0, 0.0));
        assert_eq!(frame.capacity(), 5);
        assert!(frame.slot(4).is_some());
    }

    #[test]
    fn test_release_out_of_range_is_noop() {
        let mut frame = TouchFrame::new(1);
        frame.release(9);
        assert_eq!(frame.capacity(), 1);
    }

    #[test]
    fn test_active_skips_empty_slots() {
        let mut frame = TouchFrame::new(4);
        frame.press(1, pt(3, 1.0, 1.0));
        frame.press(3, pt(5, 2.0, 2.0));
        let ids: Vec<_> = frame.active().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_find_by_id() {
        let mut frame = TouchFrame::new(3);
        frame.press(2, pt(42, 5.0, 6.0));
        assert!(frame.find(TouchId::new(42)).is_some());
        assert!(frame.find(TouchId::new(43)).is_none());
    }

    #[test]
    fn test_from_slots() {
        let frame = TouchFrame::from_slots(vec![None, Some(pt(1, 0.0, 0.0))]);
        assert_eq!(frame.capacity(), 2);
        assert_eq!(frame.active_count(), 1);
    }

    #[test]
    fn test_touch_point_serde_round_trip() {
        let p = pt(9, 1.0, 2.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: TouchPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
