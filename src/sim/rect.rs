//! Axis-aligned rectangles for avatar and world-object bounds
//!
//! Origin is the top-left corner; y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Interiors intersect; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || other.right() <= self.left()
            || self.bottom() <= other.top()
            || other.bottom() <= self.top())
    }

    /// Point lies inside or on the boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Horizontal extents intersect (strictly)
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }
}
