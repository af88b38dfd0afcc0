//! Axis-Aligned Geometry
//!
//! Boxes and circles used by platform collision and hitbox tests.
//! Boxes are center + half-extents. Box overlap is inclusive: two boxes
//! whose edges touch are considered overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as center and half-extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Box center.
    pub center: Vec2,
    /// Half-width and half-height.
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a box from center and half-extents.
    #[inline]
    pub const fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Same box moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.center + offset, self.half_extents)
    }

    /// Horizontal extents overlap (inclusive).
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() <= other.right() && other.left() <= self.right()
    }

    /// Vertical extents overlap (inclusive).
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.bottom() <= other.top() && other.bottom() <= self.top()
    }

    /// Full overlap test (inclusive).
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Strict circle-vs-point test: the point is closer to `center` than
/// `radius + margin`.
///
/// Used for hitbox contact where `margin` is the defender's half-width.
#[inline]
pub fn circle_reaches(center: Vec2, radius: f32, point: Vec2, margin: f32) -> bool {
    center.distance(point) < radius + margin
}
