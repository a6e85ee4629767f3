//! Swipe gesture recognition
//!
//! Raw touch events are reduced to a start and end point; classification is
//! a pure function of the two so it can be tested without a UI runtime.

use serde::{Deserialize, Serialize};

/// Minimum horizontal travel, in pixels, for a swipe
pub const DEFAULT_SWIPE_MIN_PX: f32 = 40.0;

/// Maximum vertical travel as a fraction of horizontal travel
pub const DEFAULT_MAX_VERTICAL_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Navigation direction through the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Thresholds a swipe must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRule {
    pub min_px: f32,
    pub max_vertical_ratio: f32,
}

impl Default for SwipeRule {
    fn default() -> Self {
        Self {
            min_px: DEFAULT_SWIPE_MIN_PX,
            max_vertical_ratio: DEFAULT_MAX_VERTICAL_RATIO,
        }
    }
}

impl SwipeRule {
    /// Classify a completed touch
    ///
    /// Finger travelling left (positive `start.x - end.x`) means next.
    /// Short or diagonal movements are rejected.
    pub fn classify(&self, start: Point, end: Point) -> Option<Direction> {
        let dx = start.x - end.x;
        let dy = start.y - end.y;

        if dx.abs() < self.min_px {
            return None;
        }
        if dy.abs() > dx.abs() * self.max_vertical_ratio {
            return None;
        }

        if dx > 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Previous)
        }
    }
}

/// Classify a swipe with the default thresholds
///
/// # Example
/// ```
/// use vitrine::viewer::{classify_gesture, Direction, Point};
///
/// let start = Point::new(200.0, 100.0);
/// assert_eq!(classify_gesture(start, Point::new(140.0, 120.0)), Some(Direction::Next));
/// assert_eq!(classify_gesture(start, Point::new(140.0, 150.0)), None);
/// ```
pub fn classify_gesture(start: Point, end: Point) -> Option<Direction> {
    SwipeRule::default().classify(start, end)
}

/// Remembers where the current touch began
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    start: Option<Point>,
}

impl TouchTracker {
    pub fn begin(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Finish the touch and classify it; a lone end without a start is ignored
    pub fn end(&mut self, point: Point, rule: &SwipeRule) -> Option<Direction> {
        self.start
            .take()
            .and_then(|start| rule.classify(start, point))
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}
