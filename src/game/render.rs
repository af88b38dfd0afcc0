//! Render Contract
//!
//! The simulation never draws. After a tick it can build a frame: camera
//! matrices plus one model transform and asset reference per platform and
//! per live combatant, handed to whatever implements [`RenderSink`].
//! Every drawable is a unit quad centered on the origin.

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::game::camera::Camera;
use crate::game::combatant::{Combatant, CombatantState};
use crate::game::platform::{Platform, PlatformKind};
use crate::game::stage::Stage;

/// What the host should bind for a drawable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AssetRef {
    /// A fighter sprite
    Fighter {
        /// Texture path
        texture: &'static str,
        /// Machine state (selects the animation strip)
        state: CombatantState,
        /// Frame within the strip
        frame: u32,
    },
    /// A platform tile
    Platform {
        /// Texture path
        texture: &'static str,
        /// Collision policy (hosts may tint by kind)
        kind: PlatformKind,
    },
}

/// One thing to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Drawable {
    /// Unit quad to world transform
    pub model: Mat4,
    /// Asset to bind
    pub asset: AssetRef,
}

/// View and projection for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraMatrices {
    /// World to view
    pub view: Mat4,
    /// View to clip
    pub projection: Mat4,
}

impl From<&Camera> for CameraMatrices {
    fn from(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }
    }
}

/// Everything a renderer needs for one frame, in draw order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Camera matrices
    pub camera: CameraMatrices,
    /// Platforms first, then live combatants in slot order
    pub drawables: Vec<Drawable>,
}

/// Host-side consumer of render frames.
pub trait RenderSink {
    /// Called once per frame before any draw.
    fn begin_frame(&mut self, camera: &CameraMatrices);

    /// Draw one item.
    fn draw(&mut self, drawable: &Drawable);

    /// Called after the last draw.
    fn end_frame(&mut self) {}
}

/// Texture for a platform kind.
pub fn platform_texture(kind: PlatformKind) -> &'static str {
    match kind {
        PlatformKind::Solid => "assets/textures/platform_solid.png",
        PlatformKind::SemiSolid => "assets/textures/platform_semi.png",
        PlatformKind::PassThrough => "assets/textures/platform_ghost.png",
    }
}

/// Model transform for a platform.
pub fn platform_model(platform: &Platform) -> Mat4 {
    let size = platform.bounds.half_extents * 2.0;
    Mat4::from_translation(platform.bounds.center.extend(0.0))
        * Mat4::from_scale(Vec3::new(size.x, size.y, 1.0))
}

/// Model transform for a combatant: translate, scale, then mirror on X
/// when facing left.
pub fn combatant_model(combatant: &Combatant) -> Mat4 {
    let size = combatant.size();
    Mat4::from_translation(combatant.position.extend(0.0))
        * Mat4::from_scale(Vec3::new(size.x * combatant.facing.sign(), size.y, 1.0))
}

/// Build the frame for the current state.
pub fn build_frame(
    stage: &Stage,
    roster: &BTreeMap<usize, Combatant>,
    camera: &Camera,
) -> RenderFrame {
    let platforms = stage.platforms().iter().map(|p| Drawable {
        model: platform_model(p),
        asset: AssetRef::Platform {
            texture: platform_texture(p.kind),
            kind: p.kind,
        },
    });

    let fighters = roster.values().filter(|c| !c.is_dead()).map(|c| Drawable {
        model: combatant_model(c),
        asset: AssetRef::Fighter {
            texture: c.archetype.texture_path(),
            state: c.state,
            frame: c.animation.frame,
        },
    });

    RenderFrame {
        camera: CameraMatrices::from(camera),
        drawables: platforms.chain(fighters).collect(),
    }
}

/// Feed a frame to a sink.
pub fn submit(frame: &RenderFrame, sink: &mut dyn RenderSink) {
    sink.begin_frame(&frame.camera);
    for drawable in &frame.drawables {
        sink.draw(drawable);
    }
    sink.end_frame();
}
