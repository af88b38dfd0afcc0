//! Platforms
//!
//! Static collidable regions. The collision policy decides which bodies a
//! platform blocks; the geometry never changes after stage setup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Aabb;

/// Downward distance used by the grounded probes.
pub const GROUND_PROBE_DEPTH: f32 = 0.1;

/// Collision policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum PlatformKind {
    /// Blocks from every direction
    #[default]
    Solid = 0,
    /// Blocks only a body falling onto it from above
    SemiSolid = 1,
    /// Never blocks
    PassThrough = 2,
}

/// A platform on the stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Platform box
    pub bounds: Aabb,
    /// Collision policy
    pub kind: PlatformKind,
}

impl Platform {
    /// Create a platform from its center and half-extents.
    pub fn new(center: Vec2, half_extents: Vec2, kind: PlatformKind) -> Self {
        Self {
            bounds: Aabb::new(center, half_extents),
            kind,
        }
    }

    /// Whether this platform takes part in movement resolution for a body
    /// at `current` moving with `velocity`.
    ///
    /// Semi-solid platforms only engage a body that is falling and whose
    /// bottom edge is at or above the platform top.
    pub fn engages(&self, current: &Aabb, velocity: Vec2) -> bool {
        match self.kind {
            PlatformKind::Solid => true,
            PlatformKind::SemiSolid => velocity.y < 0.0 && current.bottom() >= self.bounds.top(),
            PlatformKind::PassThrough => false,
        }
    }

    /// Overlap test against a body box. Pass-through platforms never overlap.
    pub fn blocks(&self, body: &Aabb) -> bool {
        match self.kind {
            PlatformKind::PassThrough => false,
            _ => self.bounds.overlaps(body),
        }
    }

    /// Whether a body resting at `body` stands on this platform.
    pub fn supports(&self, body: &Aabb) -> bool {
        let probe = body.translated(Vec2::new(0.0, -GROUND_PROBE_DEPTH));
        match self.kind {
            PlatformKind::Solid => self.bounds.overlaps(&probe),
            PlatformKind::SemiSolid => {
                body.bottom() >= self.bounds.top() && self.bounds.overlaps(&probe)
            }
            PlatformKind::PassThrough => false,
        }
    }
}
