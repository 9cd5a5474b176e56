//! Single-touch swipe detection

use bevy::prelude::*;

use super::engine::Direction;

/// Pointer id used for the left mouse button
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Phase of a touch sample; `Moved` is never consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    /// More than one finger is down; drop whatever was being tracked
    Canceled,
}

/// One touch sample delivered for a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: Vec2,
}

impl TouchSample {
    pub fn began(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            phase: TouchPhase::Began,
            position: Vec2::new(x, y),
        }
    }

    pub fn ended(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            phase: TouchPhase::Ended,
            position: Vec2::new(x, y),
        }
    }

    pub fn canceled() -> Self {
        Self {
            id: 0,
            phase: TouchPhase::Canceled,
            position: Vec2::ZERO,
        }
    }
}

/// Map a horizontal drag to a navigation direction.
/// Dragging left (negative delta) shows the next item.
pub fn swipe_direction(delta_x: f32, threshold: f32) -> Option<Direction> {
    if delta_x.abs() < threshold {
        return None;
    }
    if delta_x < 0.0 {
        Some(Direction::Next)
    } else {
        Some(Direction::Previous)
    }
}

/// Remembers which touch is being followed and where it began
#[derive(Debug, Clone, Default)]
pub struct SwipeDetector {
    start: Option<(u64, Vec2)>,
}

impl SwipeDetector {
    /// Feed one sample. Returns a direction when the tracked touch ends far
    /// enough from where it began. Ends from other touches, or without a
    /// recorded begin, are ignored. A second finger landing while one is
    /// tracked drops both.
    pub fn feed(&mut self, sample: TouchSample, threshold: f32) -> Option<Direction> {
        match sample.phase {
            TouchPhase::Began => {
                self.start = match self.start {
                    Some((id, _)) if id != sample.id => None,
                    _ => Some((sample.id, sample.position)),
                };
                None
            }
            TouchPhase::Moved => None,
            TouchPhase::Ended => {
                let (id, start) = self.start?;
                if id != sample.id {
                    return None;
                }
                self.start = None;
                swipe_direction(sample.position.x - start.x, threshold)
            }
            TouchPhase::Canceled => {
                self.start = None;
                None
            }
        }
    }

    /// Forget any touch in progress
    pub fn reset(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_past_threshold_is_next() {
        let mut detector = SwipeDetector::default();
        assert_eq!(detector.feed(TouchSample::began(1, 400.0, 300.0), 50.0), None);
        assert_eq!(
            detector.feed(TouchSample::ended(1, 340.0, 310.0), 50.0),
            Some(Direction::Next)
        );
    }

    #[test]
    fn test_short_swipe_does_nothing() {
        let mut detector = SwipeDetector::default();
        detector.feed(TouchSample::began(1, 100.0, 0.0), 50.0);
        assert_eq!(detector.feed(TouchSample::ended(1, 140.0, 0.0), 50.0), None);
        assert!(!detector.is_tracking());
    }

    #[test]
    fn test_swipe_right_is_previous_and_threshold_inclusive() {
        assert_eq!(swipe_direction(50.0, 50.0), Some(Direction::Previous));
        assert_eq!(swipe_direction(-50.0, 50.0), Some(Direction::Next));
        assert_eq!(swipe_direction(49.9, 50.0), None);
    }

    #[test]
    fn test_moves_are_ignored_and_end_without_begin_is_dropped() {
        let mut detector = SwipeDetector::default();
        assert_eq!(detector.feed(TouchSample::ended(1, -500.0, 0.0), 50.0), None);

        detector.feed(TouchSample::began(1, 0.0, 0.0), 50.0);
        let moved = TouchSample {
            id: 1,
            phase: TouchPhase::Moved,
            position: Vec2::new(-300.0, 0.0),
        };
        assert_eq!(detector.feed(moved, 50.0), None);
        assert!(detector.is_tracking());
        // Only begin/end positions matter
        assert_eq!(detector.feed(TouchSample::ended(1, -10.0, 0.0), 50.0), None);
    }

    #[test]
    fn test_second_finger_drops_the_pending_swipe() {
        let mut detector = SwipeDetector::default();
        detector.feed(TouchSample::began(1, 500.0, 0.0), 50.0);
        detector.feed(TouchSample::began(2, 100.0, 0.0), 50.0);
        assert!(!detector.is_tracking());
        // A short drag by the first finger must not read as a long one
        assert_eq!(detector.feed(TouchSample::ended(1, 480.0, 0.0), 50.0), None);
        assert_eq!(detector.feed(TouchSample::ended(2, 400.0, 0.0), 50.0), None);
    }

    #[test]
    fn test_end_from_another_touch_is_ignored() {
        let mut detector = SwipeDetector::default();
        detector.feed(TouchSample::began(7, 500.0, 0.0), 50.0);
        assert_eq!(detector.feed(TouchSample::ended(8, 100.0, 0.0), 50.0), None);
        assert!(detector.is_tracking());
        assert_eq!(
            detector.feed(TouchSample::ended(7, 420.0, 0.0), 50.0),
            Some(Direction::Next)
        );
    }

    #[test]
    fn test_cancel_clears_tracking() {
        let mut detector = SwipeDetector::default();
        detector.feed(TouchSample::began(MOUSE_POINTER_ID, 0.0, 0.0), 50.0);
        assert_eq!(detector.feed(TouchSample::canceled(), 50.0), None);
        assert!(!detector.is_tracking());
        assert_eq!(detector.feed(TouchSample::ended(MOUSE_POINTER_ID, -300.0, 0.0), 50.0), None);
    }
}
