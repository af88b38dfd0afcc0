//! Camera Framing
//!
//! Keeps every live combatant on screen: the view centers on the padded
//! bounding box of their positions and widens an orthographic projection
//! as they spread out.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Padding added on every side of the bounding box.
pub const FRAME_PADDING: f32 = 3.0;

/// Target aspect ratio.
pub const ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Camera distance in front of the stage plane.
pub const CAMERA_DEPTH: f32 = 20.0;

/// Projection half-width at zoom 1.
pub const BASE_HALF_WIDTH: f32 = 10.0;

/// Near clip plane.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip plane.
pub const FAR_PLANE: f32 = 100.0;

/// Derived viewpoint, overwritten every tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position
    pub eye: Vec3,
    /// Zoom factor (≥ 1)
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DEPTH),
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Reframe on `positions`. Leaves the camera unchanged when empty.
    pub fn frame<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut bounds: Option<(Vec2, Vec2)> = None;
        for p in positions {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(p), max.max(p)),
                None => (p, p),
            });
        }
        let Some((min, max)) = bounds else {
            return;
        };

        let min = min - Vec2::splat(FRAME_PADDING);
        let max = max + Vec2::splat(FRAME_PADDING);
        let center = (min + max) * 0.5;
        let size = max - min;

        self.zoom = (size.x / 16.0).max(size.y / 9.0).max(1.0);
        self.eye = Vec3::new(center.x, center.y, CAMERA_DEPTH);
    }

    /// Projection half-width.
    #[inline]
    pub fn half_width(&self) -> f32 {
        BASE_HALF_WIDTH * self.zoom
    }

    /// Projection half-height.
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_width() / ASPECT_RATIO
    }

    /// View matrix looking down -Z at the stage plane.
    pub fn view_matrix(&self) -> Mat4 {
        let target = Vec3::new(self.eye.x, self.eye.y, 0.0);
        Mat4::look_at_rh(self.eye, target, Vec3::Y)
    }

    /// Orthographic projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        let w = self.half_width();
        let h = self.half_height();
        Mat4::orthographic_rh_gl(-w, w, -h, h, NEAR_PLANE, FAR_PLANE)
    }
}
