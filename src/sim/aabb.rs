//! Axis-aligned bounding boxes
//!
//! Every entity and projectile is tested as a rectangle anchored at its
//! bottom-left corner, with y growing upward from the ground line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (position is the bottom-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }

    /// True if the rectangle lies completely outside `[0, width] x [0, height]`
    pub fn outside_bounds(&self, width: f32, height: f32) -> bool {
        let max = self.max();
        max.x < 0.0 || self.min.x > width || max.y < 0.0 || self.min.y > height
    }
}
