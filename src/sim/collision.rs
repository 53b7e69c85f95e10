//! Axis-aligned bounding boxes
//!
//! Collision is a discrete overlap test evaluated once per tick. There is no
//! swept test, so a bullet that travels further than a target's width in one
//! tick can pass through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Center-tracked rectangle with a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Square box of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left + size * 0.5, size)
    }

    /// Same box moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half_extents: self.half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Keep the size, move the center
    #[inline]
    pub fn recenter(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Inclusive overlap: boxes sharing only an edge still collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}
