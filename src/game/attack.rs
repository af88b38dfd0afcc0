//! Attacks and Hitbox Generation
//!
//! Each attack kind has a base hitbox (placed relative to the body and the
//! facing direction), scaled by the attacker's archetype. Special kinds also
//! carry timing, cooldown and an optional self-impulse.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::archetype::Archetype;
use crate::game::combatant::Facing;

/// Attack selector carried by the intent snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum AttackKind {
    /// Jab in front of the body.
    #[default]
    Neutral = 0,
    /// Strike above the body.
    Up = 1,
    /// Strike below the body.
    Down = 2,
    /// Longer forward strike.
    Side = 3,
    /// Burst centered on the body.
    SpecialNeutral = 4,
    /// Rising recovery strike.
    SpecialUp = 5,
    /// Wide strike below the body.
    SpecialDown = 6,
    /// Lunging forward strike.
    SpecialSide = 7,
}

impl AttackKind {
    /// The four special kinds, in cooldown-map order.
    pub const SPECIALS: [AttackKind; 4] = [
        AttackKind::SpecialNeutral,
        AttackKind::SpecialUp,
        AttackKind::SpecialDown,
        AttackKind::SpecialSide,
    ];

    /// Whether this kind goes through the special-attack path.
    #[inline]
    pub fn is_special(self) -> bool {
        matches!(
            self,
            AttackKind::SpecialNeutral
                | AttackKind::SpecialUp
                | AttackKind::SpecialDown
                | AttackKind::SpecialSide
        )
    }

    /// Get kind from index (0-7).
    pub fn from_index(index: u8) -> Option<AttackKind> {
        match index {
            0 => Some(AttackKind::Neutral),
            1 => Some(AttackKind::Up),
            2 => Some(AttackKind::Down),
            3 => Some(AttackKind::Side),
            4 => Some(AttackKind::SpecialNeutral),
            5 => Some(AttackKind::SpecialUp),
            6 => Some(AttackKind::SpecialDown),
            7 => Some(AttackKind::SpecialSide),
            _ => None,
        }
    }
}

/// A circular attack volume, valid for the tick it was generated on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Offset of the circle center from the attacker's body center.
    pub offset: Vec2,
    /// Circle radius.
    pub radius: f32,
    /// Damage before the global multiplier; rounded when applied.
    pub damage: f32,
    /// Knockback independent of the defender's damage.
    pub knockback_base: f32,
    /// Knockback added per point of defender damage.
    pub knockback_scaling: f32,
    /// Launch direction (not normalized).
    pub knockback_direction: Vec2,
}

/// Self-impulse imparted by a special, independent of its hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpecialImpulse {
    /// Set vertical velocity to `jump_impulse * factor`.
    Vertical {
        /// Multiple of the jump impulse.
        factor: f32,
    },
    /// Set horizontal velocity to `move_speed * factor` toward the facing side.
    Horizontal {
        /// Multiple of the move speed.
        factor: f32,
    },
}

/// Timing for a special kind, after archetype scaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialProfile {
    /// Forced-state duration (seconds).
    pub duration: f32,
    /// Cooldown started on acceptance (seconds).
    pub cooldown: f32,
    /// Optional velocity change on the attacker.
    pub impulse: Option<SpecialImpulse>,
}

/// Timing for a special kind scaled by archetype. `None` for ordinary kinds.
pub fn special_profile(kind: AttackKind, archetype: Archetype) -> Option<SpecialProfile> {
    let (duration, cooldown, impulse) = match kind {
        AttackKind::SpecialNeutral => (0.5, 1.0, None),
        AttackKind::SpecialUp => (0.4, 2.0, Some(SpecialImpulse::Vertical { factor: 1.5 })),
        AttackKind::SpecialDown => (0.6, 1.5, None),
        AttackKind::SpecialSide => (0.4, 1.2, Some(SpecialImpulse::Horizontal { factor: 2.0 })),
        _ => return None,
    };

    let timing = archetype.special_timing();
    Some(SpecialProfile {
        duration: duration * timing.duration,
        cooldown: cooldown * timing.cooldown,
        impulse,
    })
}

/// Build the single hitbox for `kind`.
///
/// `body_size` is the full body extents (width, height).
pub fn build_hitbox(
    kind: AttackKind,
    archetype: Archetype,
    body_size: Vec2,
    facing: Facing,
) -> Hitbox {
    let w = body_size.x;
    let h = body_size.y;
    let s = facing.sign();

    let mut hitbox = match kind {
        AttackKind::Neutral => Hitbox {
            offset: Vec2::new(s * w * 0.5, 0.0),
            radius: w * 0.6,
            damage: 5.0,
            knockback_base: 5.0,
            knockback_scaling: 0.1,
            knockback_direction: Vec2::new(s, 0.5),
        },
        AttackKind::Up => Hitbox {
            offset: Vec2::new(0.0, h * 0.5),
            radius: w * 0.5,
            damage: 4.0,
            knockback_base: 4.0,
            knockback_scaling: 0.12,
            knockback_direction: Vec2::new(0.0, 1.0),
        },
        AttackKind::Down => Hitbox {
            offset: Vec2::new(0.0, -h * 0.5),
            radius: w * 0.5,
            damage: 6.0,
            knockback_base: 3.0,
            knockback_scaling: 0.08,
            knockback_direction: Vec2::new(0.0, -1.0),
        },
        AttackKind::Side => Hitbox {
            offset: Vec2::new(s * w * 0.7, 0.0),
            radius: w * 0.7,
            damage: 7.0,
            knockback_base: 6.0,
            knockback_scaling: 0.15,
            knockback_direction: Vec2::new(s, 0.2),
        },
        AttackKind::SpecialNeutral => Hitbox {
            offset: Vec2::ZERO,
            radius: w * 0.8,
            damage: 10.0,
            knockback_base: 7.0,
            knockback_scaling: 0.2,
            knockback_direction: Vec2::new(s, 0.5),
        },
        AttackKind::SpecialUp => Hitbox {
            offset: Vec2::new(0.0, h * 0.8),
            radius: w * 0.7,
            damage: 8.0,
            knockback_base: 6.0,
            knockback_scaling: 0.18,
            knockback_direction: Vec2::new(0.0, 1.0),
        },
        AttackKind::SpecialDown => Hitbox {
            offset: Vec2::new(0.0, -h * 0.5),
            radius: w,
            damage: 12.0,
            knockback_base: 5.0,
            knockback_scaling: 0.15,
            knockback_direction: Vec2::new(0.0, -0.8),
        },
        AttackKind::SpecialSide => Hitbox {
            offset: Vec2::new(s * w, 0.0),
            radius: w * 0.9,
            damage: 9.0,
            knockback_base: 8.0,
            knockback_scaling: 0.22,
            knockback_direction: Vec2::new(s, 0.1),
        },
    };

    let scaling = archetype.hitbox_scaling();
    hitbox.damage *= scaling.damage;
    hitbox.knockback_base *= scaling.knockback_base;
    hitbox.knockback_scaling *= scaling.knockback_scaling;
    hitbox.radius *= scaling.radius;
    hitbox
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Vec2 = Vec2::new(1.0, 2.0);

    #[test]
    fn test_neutral_base_values() {
        let hb = build_hitbox(AttackKind::Neutral, Archetype::Balanced, BODY, Facing::Right);
        assert_eq!(hb.offset, Vec2::new(0.5, 0.0));
        assert_eq!(hb.radius, 0.6);
        assert_eq!(hb.damage, 5.0);
        assert_eq!(hb.knockback_base, 5.0);
        assert_eq!(hb.knockback_scaling, 0.1);
        assert_eq!(hb.knockback_direction, Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_facing_mirrors_horizontal_kinds() {
        let right = build_hitbox(AttackKind::Side, Archetype::Balanced, BODY, Facing::Right);
        let left = build_hitbox(AttackKind::Side, Archetype::Balanced, BODY, Facing::Left);
        assert_eq!(left.offset.x, -right.offset.x);
        assert_eq!(left.knockback_direction.x, -right.knockback_direction.x);
        assert_eq!(left.knockback_direction.y, right.knockback_direction.y);
    }

    #[test]
    fn test_up_and_down_ignore_facing() {
        let vertical = [
            AttackKind::Up,
            AttackKind::Down,
            AttackKind::SpecialUp,
            AttackKind::SpecialDown,
        ];
        for kind in vertical {
            let right = build_hitbox(kind, Archetype::Balanced, BODY, Facing::Right);
            let left = build_hitbox(kind, Archetype::Balanced, BODY, Facing::Left);
            assert_eq!(right, left, "{:?} should not depend on facing", kind);
        }
    }

    #[test]
    fn test_heavy_scaling() {
        let hb = build_hitbox(AttackKind::Neutral, Archetype::Heavy, BODY, Facing::Right);
        assert!((hb.damage - 6.5).abs() < 1e-5);
        assert!((hb.knockback_base - 6.0).abs() < 1e-5);
        assert!((hb.radius - 0.66).abs() < 1e-5);
        assert_eq!(hb.knockback_scaling, 0.1);
    }

    #[test]
    fn test_technical_only_scales_knockback_growth() {
        let base = build_hitbox(AttackKind::Side, Archetype::Balanced, BODY, Facing::Right);
        let tech = build_hitbox(AttackKind::Side, Archetype::Technical, BODY, Facing::Right);
        assert_eq!(tech.damage, base.damage);
        assert_eq!(tech.radius, base.radius);
        assert_eq!(tech.knockback_base, base.knockback_base);
        assert!((tech.knockback_scaling - base.knockback_scaling * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_specials_hit_harder_than_ordinary() {
        let pairs = [
            (AttackKind::Neutral, AttackKind::SpecialNeutral),
            (AttackKind::Up, AttackKind::SpecialUp),
            (AttackKind::Down, AttackKind::SpecialDown),
            (AttackKind::Side, AttackKind::SpecialSide),
        ];
        for (ordinary, special) in pairs {
            let o = build_hitbox(ordinary, Archetype::Balanced, BODY, Facing::Right);
            let s = build_hitbox(special, Archetype::Balanced, BODY, Facing::Right);
            assert!(s.damage > o.damage, "{:?} vs {:?}", special, ordinary);
            assert!(s.radius > o.radius);
        }
    }

    #[test]
    fn test_special_profile() {
        assert!(special_profile(AttackKind::Neutral, Archetype::Balanced).is_none());

        let up = special_profile(AttackKind::SpecialUp, Archetype::Balanced).unwrap();
        assert_eq!(up.duration, 0.4);
        assert_eq!(up.cooldown, 2.0);
        assert_eq!(up.impulse, Some(SpecialImpulse::Vertical { factor: 1.5 }));

        let heavy_side = special_profile(AttackKind::SpecialSide, Archetype::Heavy).unwrap();
        assert!((heavy_side.duration - 0.52).abs() < 1e-6);
        assert!((heavy_side.cooldown - 1.44).abs() < 1e-6);

        let down = special_profile(AttackKind::SpecialDown, Archetype::Speedy).unwrap();
        assert!(down.impulse.is_none());
    }

    #[test]
    fn test_kind_index_round_trip() {
        for i in 0..8u8 {
            assert_eq!(AttackKind::from_index(i).map(|k| k as u8), Some(i));
        }
        assert_eq!(AttackKind::from_index(8), None);
    }
}
