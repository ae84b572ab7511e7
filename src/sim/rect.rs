//! Axis-aligned rectangle geometry for the car, obstacles and goal regions
//!
//! Screen space: origin at the top-left, y grows downward, so `top < bottom`.
//! All containment and overlap tests use closed intervals: touching edges count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box described by its center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build from the top-left corner, as sprites are usually placed
    pub fn from_top_left(top_left: Vec2, width: f32, height: f32) -> Self {
        let size = Vec2::new(width.max(0.0), height.max(0.0));
        Self::new(top_left + size / 2.0, size.x, size.y)
    }

    /// Axis-aligned bounds of a `width x height` box rotated by `degrees`
    ///
    /// This is the box a rotated sprite occupies on screen.
    pub fn rotated_bounds(center: Vec2, width: f32, height: f32, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        Self::new(center, width * cos + height * sin, width * sin + height * cos)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    /// Same center, size multiplied by `ratio`
    pub fn scaled(&self, ratio: f32) -> Self {
        Self::new(self.center, self.width * ratio, self.height * ratio)
    }

    /// Closed-interval overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Grow (or shrink) a rectangle around its own center
#[inline]
pub fn scale_rect(rect: &Rect, ratio: f32) -> Rect {
    rect.scaled(ratio)
}
