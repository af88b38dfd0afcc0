//! Stage
//!
//! Platforms, the blast zone and spawn points, plus the per-tick stage pass:
//! position integration with axis-separated platform resolution, the
//! grounded probe and the out-of-bounds knockout.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::geometry::Aabb;
use crate::game::combatant::{Combatant, Knockout};
use crate::game::platform::{Platform, PlatformKind};

/// Spawn used for slots past the end of the spawn list.
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(0.0, 5.0);

/// Rectangle outside of which a combatant loses a stock.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlastZone {
    /// Minimum X
    pub left: f32,
    /// Maximum X
    pub right: f32,
    /// Maximum Y
    pub top: f32,
    /// Minimum Y
    pub bottom: f32,
}

impl BlastZone {
    /// Check whether a point is inside (edges count as inside).
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.bottom
            && point.y <= self.top
    }
}

impl Default for BlastZone {
    fn default() -> Self {
        Self {
            left: -15.0,
            right: 15.0,
            top: 10.0,
            bottom: -10.0,
        }
    }
}

/// The arena a match is played on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name
    pub name: String,
    /// Blast zone
    pub blast_zone: BlastZone,
    platforms: Vec<Platform>,
    spawn_points: Vec<Vec2>,
}

impl Stage {
    /// Empty stage with the standard blast zone and four spawn points.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blast_zone: BlastZone::default(),
            platforms: Vec::new(),
            spawn_points: vec![
                Vec2::new(-5.0, 5.0),
                Vec2::new(5.0, 5.0),
                Vec2::new(-2.5, 5.0),
                Vec2::new(2.5, 5.0),
            ],
        }
    }

    /// Standard layout: a solid 10 x 1 main platform centered on the
    /// origin, two semi-solid side platforms and a semi-solid top platform.
    pub fn default_layout() -> Self {
        let mut stage = Self::new("Battlefield");
        stage.add_platform(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.5), PlatformKind::Solid);
        stage.add_platform(Vec2::new(-5.0, 2.0), Vec2::new(1.5, 0.25), PlatformKind::SemiSolid);
        stage.add_platform(Vec2::new(5.0, 2.0), Vec2::new(1.5, 0.25), PlatformKind::SemiSolid);
        stage.add_platform(Vec2::new(0.0, 4.0), Vec2::new(2.0, 0.25), PlatformKind::SemiSolid);
        stage
    }

    /// Append a platform. Resolution order follows insertion order.
    pub fn add_platform(&mut self, center: Vec2, half_extents: Vec2, kind: PlatformKind) {
        self.platforms.push(Platform::new(center, half_extents, kind));
    }

    /// Platforms in insertion order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Spawn point for a slot, or [`DEFAULT_SPAWN`] if out of range.
    pub fn spawn_position(&self, slot: usize) -> Vec2 {
        self.spawn_points.get(slot).copied().unwrap_or(DEFAULT_SPAWN)
    }

    /// Check whether a point lies outside the blast zone.
    pub fn is_out_of_bounds(&self, position: Vec2) -> bool {
        !self.blast_zone.contains(position)
    }

    /// Check whether a body is standing on any platform.
    pub fn is_grounded(&self, body: &Aabb) -> bool {
        self.platforms.iter().any(|p| p.supports(body))
    }

    /// Integrate `position` by `velocity * dt` against the platforms.
    ///
    /// On overlap, tries horizontal-only movement (dropping vertical
    /// velocity), then vertical-only (dropping horizontal velocity), then
    /// stays put with zero velocity. Returns the new position and velocity.
    pub fn resolve_motion(
        &self,
        position: Vec2,
        half_extents: Vec2,
        velocity: Vec2,
        dt: f32,
    ) -> (Vec2, Vec2) {
        let current = Aabb::new(position, half_extents);
        let step = velocity * dt;
        let mut target = position + step;
        let mut velocity = velocity;

        for platform in &self.platforms {
            if !platform.engages(&current, velocity) {
                continue;
            }
            if !platform.blocks(&Aabb::new(target, half_extents)) {
                continue;
            }

            let horizontal = Vec2::new(position.x + step.x, position.y);
            let vertical = Vec2::new(position.x, position.y + step.y);

            if !platform.blocks(&Aabb::new(horizontal, half_extents)) {
                target = horizontal;
                velocity.y = 0.0;
            } else if !platform.blocks(&Aabb::new(vertical, half_extents)) {
                target = vertical;
                velocity.x = 0.0;
            } else {
                target = position;
                velocity = Vec2::ZERO;
            }
        }

        (target, velocity)
    }

    /// Run the stage pass for one live combatant.
    ///
    /// Returns the knockout if the combatant left the blast zone.
    pub fn step(&self, combatant: &mut Combatant, dt: f32) -> Option<Knockout> {
        if combatant.is_dead() {
            return None;
        }

        let (position, velocity) =
            self.resolve_motion(combatant.position, combatant.half_extents, combatant.velocity, dt);
        combatant.position = position;
        combatant.velocity = velocity;
        combatant.grounded = self.is_grounded(&combatant.body());

        if self.is_out_of_bounds(combatant.position) {
            debug!(
                slot = combatant.slot,
                x = combatant.position.x,
                y = combatant.position.y,
                "Left blast zone"
            );
            return combatant.knock_out();
        }

        None
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::default_layout()
    }
}
