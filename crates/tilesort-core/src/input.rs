//! Pointer event vocabulary fed to the engine by the host UI layer.
//!
//! Positions are page-space. Every event carries a host-supplied timestamp
//! in milliseconds (the DOM `event.timeStamp` convention), which keeps the
//! drag state machine deterministic and free of wall-clock reads.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        time_ms: f64,
    },
    Move {
        position: Point,
        time_ms: f64,
    },
    Scroll {
        position: Point,
        delta: Vec2,
        time_ms: f64,
    },
    Up {
        position: Point,
        button: MouseButton,
        time_ms: f64,
    },
}

impl PointerEvent {
    /// The pointer position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            Self::Down { position, .. }
            | Self::Move { position, .. }
            | Self::Scroll { position, .. }
            | Self::Up { position, .. } => *position,
        }
    }

    /// The timestamp carried by the event, in milliseconds.
    pub fn time_ms(&self) -> f64 {
        match self {
            Self::Down { time_ms, .. }
            | Self::Move { time_ms, .. }
            | Self::Scroll { time_ms, .. }
            | Self::Up { time_ms, .. } => *time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ev = PointerEvent::Down {
            position: Point::new(10.0, 20.0),
            button: MouseButton::Left,
            time_ms: 42.0,
        };
        assert_eq!(ev.position(), Point::new(10.0, 20.0));
        assert!((ev.time_ms() - 42.0).abs() < f64::EPSILON);

        let ev = PointerEvent::Scroll {
            position: Point::new(1.0, 2.0),
            delta: Vec2::new(0.0, -30.0),
            time_ms: 100.0,
        };
        assert_eq!(ev.position(), Point::new(1.0, 2.0));
    }
}
