//! Settle animation: eases a non-dragged tile from its current position to
//! its newly assigned layout slot.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default settle duration in milliseconds.
pub const SETTLE_DURATION_MS: f64 = 250.0;

/// Ease-out cubic curve, `t` in `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

/// An in-flight transition of a point toward a target position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settle {
    from: Point,
    to: Point,
    start_ms: f64,
    duration_ms: f64,
}

impl Settle {
    /// Start a transition at `start_ms` with the default duration.
    pub fn new(from: Point, to: Point, start_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: SETTLE_DURATION_MS,
        }
    }

    /// The target position.
    pub fn target(&self) -> Point {
        self.to
    }

    /// The eased position at `now_ms`. Clamped to the endpoints outside the
    /// animation window.
    pub fn at(&self, now_ms: f64) -> Point {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from.lerp(self.to, ease_out_cubic(t))
    }

    /// Whether the transition has run to completion at `now_ms`.
    pub fn finished(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert!((ease_out_cubic(0.0)).abs() < f64::EPSILON);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
        // Monotonic on a coarse sample.
        let mut last = 0.0;
        for i in 1..=10 {
            let v = ease_out_cubic(i as f64 / 10.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_settle_endpoints() {
        let s = Settle::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1000.0);

        assert_eq!(s.at(1000.0), Point::new(0.0, 0.0));
        assert_eq!(s.at(1000.0 + SETTLE_DURATION_MS), Point::new(100.0, 0.0));
        // Clamped outside the window.
        assert_eq!(s.at(500.0), Point::new(0.0, 0.0));
        assert_eq!(s.at(9999.0), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_settle_progresses() {
        let s = Settle::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 0.0);
        let halfway = s.at(SETTLE_DURATION_MS / 2.0);

        // Ease-out is past the linear midpoint at half time.
        assert!(halfway.x > 50.0);
        assert!(halfway.x < 100.0);
        assert!(!s.finished(SETTLE_DURATION_MS - 1.0));
        assert!(s.finished(SETTLE_DURATION_MS));
    }
}
