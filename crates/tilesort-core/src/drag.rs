//! Drag session state: click/drag disambiguation and pointer tracking.
//!
//! At most one session exists page-wide. The session itself only latches
//! pointer state; the structural decisions (move, transfer) live in
//! [`crate::scope::SortableScope`], which owns the container set.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::container::ContainerId;

/// Click-vs-drag thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Gestures whose total pointer travel stays under this are clicks.
    pub click_distance_px: f64,
    /// Gestures released before this much time has passed are clicks.
    pub click_duration_ms: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            click_distance_px: 8.0,
            click_duration_ms: 100.0,
        }
    }
}

/// Phase of the page-wide drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    /// No pointer button held.
    Idle,
    /// Button held, click thresholds not yet crossed.
    Armed,
    /// Thresholds crossed; the item follows the pointer.
    Dragging,
}

/// Terminal classification of a gesture, decided once at release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
}

/// Pointer state latched while a button is held on an item handle.
#[derive(Debug, Clone)]
pub(crate) struct ActiveDrag<T> {
    /// The dragged item.
    pub item: T,
    /// Container currently owning the item; updated on transfer.
    pub source: ContainerId,
    /// Index in the originating container at press time.
    pub origin_index: usize,
    /// Pointer offset from the item's page-space top-left at press time.
    pub anchor: Vec2,
    /// Press timestamp in milliseconds.
    pub down_ms: f64,
    /// Accumulated Euclidean pointer travel.
    pub travel: f64,
    /// Most recent pointer position.
    pub last_pointer: Point,
    /// Whether both click thresholds have been crossed.
    pub dragging: bool,
}

impl<T> ActiveDrag<T> {
    pub fn new(
        item: T,
        source: ContainerId,
        origin_index: usize,
        anchor: Vec2,
        position: Point,
        down_ms: f64,
    ) -> Self {
        Self {
            item,
            source,
            origin_index,
            anchor,
            down_ms,
            travel: 0.0,
            last_pointer: position,
            dragging: false,
        }
    }

    /// Record pointer motion, accumulating travel distance.
    pub fn track(&mut self, position: Point) {
        self.travel += self.last_pointer.distance(position);
        self.last_pointer = position;
    }

    /// Milliseconds since the press.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        (now_ms - self.down_ms).max(0.0)
    }

    /// Whether the gesture has left click territory. A session transitions
    /// `Armed -> Dragging` the first time this holds.
    pub fn crossed(&self, now_ms: f64, config: &DragConfig) -> bool {
        self.elapsed(now_ms) >= config.click_duration_ms
            && self.travel >= config.click_distance_px
    }

    /// Classify the gesture at release time. The complement of `crossed`:
    /// short on either axis means click.
    pub fn classify(&self, now_ms: f64, config: &DragConfig) -> Gesture {
        if self.elapsed(now_ms) < config.click_duration_ms
            || self.travel < config.click_distance_px
        {
            Gesture::Click
        } else {
            Gesture::Drag
        }
    }

    /// Free-floating page-space top-left of the dragged item.
    pub fn page_position(&self) -> Point {
        self.last_pointer - self.anchor
    }

    /// Free-floating position relative to the given container origin.
    pub fn local_position(&self, origin: Point) -> Point {
        self.page_position() - origin.to_vec2()
    }

    pub fn phase(&self) -> DragPhase {
        if self.dragging {
            DragPhase::Dragging
        } else {
            DragPhase::Armed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session() -> ActiveDrag<u32> {
        ActiveDrag::new(
            7,
            Uuid::new_v4(),
            0,
            Vec2::new(10.0, 10.0),
            Point::new(50.0, 50.0),
            0.0,
        )
    }

    #[test]
    fn test_travel_accumulates_euclidean_distance() {
        let mut s = session();
        s.track(Point::new(53.0, 54.0)); // 5 px
        s.track(Point::new(53.0, 54.0)); // no motion
        s.track(Point::new(56.0, 58.0)); // 5 px
        assert!((s.travel - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_quick_short_gesture_is_click() {
        // 50 ms, 3 px: both under threshold.
        let mut s = session();
        s.track(Point::new(53.0, 50.0));
        assert_eq!(s.classify(50.0, &DragConfig::default()), Gesture::Click);
        assert!(!s.crossed(50.0, &DragConfig::default()));
    }

    #[test]
    fn test_long_far_gesture_is_drag() {
        // 200 ms, 40 px: both exceeded.
        let mut s = session();
        s.track(Point::new(90.0, 50.0));
        assert_eq!(s.classify(200.0, &DragConfig::default()), Gesture::Drag);
        assert!(s.crossed(200.0, &DragConfig::default()));
    }

    #[test]
    fn test_short_travel_stays_click_regardless_of_time() {
        let s = session();
        assert_eq!(s.classify(5000.0, &DragConfig::default()), Gesture::Click);
    }

    #[test]
    fn test_quick_release_stays_click_regardless_of_travel() {
        let mut s = session();
        s.track(Point::new(300.0, 300.0));
        assert_eq!(s.classify(50.0, &DragConfig::default()), Gesture::Click);
    }

    #[test]
    fn test_free_position_subtracts_anchor() {
        let mut s = session();
        s.track(Point::new(175.0, 60.0));
        assert_eq!(s.page_position(), Point::new(165.0, 50.0));
        assert_eq!(
            s.local_position(Point::new(100.0, 0.0)),
            Point::new(65.0, 50.0)
        );
    }
}
