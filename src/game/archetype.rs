//! Fighter Archetypes
//!
//! A closed set of stat profiles. Everything that differs between fighters
//! is a lookup on the archetype tag; there is no per-fighter code.

use serde::{Deserialize, Serialize};

/// Fighter stat profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum Archetype {
    /// Average stats
    #[default]
    Balanced = 0,
    /// Slow but powerful
    Heavy = 1,
    /// Fast but weaker
    Speedy = 2,
    /// Stronger knockback growth, quicker specials
    Technical = 3,
}

/// Movement and weight stats for an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Horizontal run speed (units/s).
    pub move_speed: f32,
    /// Vertical velocity applied on jump (units/s).
    pub jump_impulse: f32,
    /// Divisor on received knockback.
    pub weight: f32,
}

/// Multipliers applied to every hitbox an archetype generates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitboxScaling {
    /// Damage multiplier.
    pub damage: f32,
    /// Knockback-base multiplier.
    pub knockback_base: f32,
    /// Knockback-scaling multiplier.
    pub knockback_scaling: f32,
    /// Radius multiplier.
    pub radius: f32,
}

/// Multipliers applied to special-move timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialTiming {
    /// Forced-state duration multiplier.
    pub duration: f32,
    /// Cooldown multiplier.
    pub cooldown: f32,
}

impl Archetype {
    /// All archetypes in index order.
    pub const ALL: [Archetype; 4] = [
        Archetype::Balanced,
        Archetype::Heavy,
        Archetype::Speedy,
        Archetype::Technical,
    ];

    /// Movement stats.
    pub fn stats(self) -> Stats {
        match self {
            Archetype::Balanced => Stats {
                move_speed: 5.0,
                jump_impulse: 10.0,
                weight: 1.0,
            },
            Archetype::Heavy => Stats {
                move_speed: 3.5,
                jump_impulse: 8.0,
                weight: 1.5,
            },
            Archetype::Speedy => Stats {
                move_speed: 7.0,
                jump_impulse: 11.0,
                weight: 0.8,
            },
            Archetype::Technical => Stats {
                move_speed: 4.5,
                jump_impulse: 9.5,
                weight: 0.9,
            },
        }
    }

    /// Hitbox multipliers.
    pub fn hitbox_scaling(self) -> HitboxScaling {
        match self {
            Archetype::Balanced => HitboxScaling {
                damage: 1.0,
                knockback_base: 1.0,
                knockback_scaling: 1.0,
                radius: 1.0,
            },
            Archetype::Heavy => HitboxScaling {
                damage: 1.3,
                knockback_base: 1.2,
                knockback_scaling: 1.0,
                radius: 1.1,
            },
            Archetype::Speedy => HitboxScaling {
                damage: 0.9,
                knockback_base: 0.9,
                knockback_scaling: 1.0,
                radius: 0.9,
            },
            Archetype::Technical => HitboxScaling {
                damage: 1.0,
                knockback_base: 1.0,
                knockback_scaling: 1.2,
                radius: 1.0,
            },
        }
    }

    /// Duration of an ordinary attack (seconds).
    pub fn attack_duration(self) -> f32 {
        match self {
            Archetype::Balanced => 0.3,
            Archetype::Heavy => 0.5,
            Archetype::Speedy => 0.2,
            Archetype::Technical => 0.4,
        }
    }

    /// Special-move timing multipliers.
    pub fn special_timing(self) -> SpecialTiming {
        match self {
            Archetype::Balanced => SpecialTiming {
                duration: 1.0,
                cooldown: 1.0,
            },
            Archetype::Heavy => SpecialTiming {
                duration: 1.3,
                cooldown: 1.2,
            },
            Archetype::Speedy => SpecialTiming {
                duration: 0.8,
                cooldown: 0.9,
            },
            Archetype::Technical => SpecialTiming {
                duration: 0.9,
                cooldown: 0.8,
            },
        }
    }

    /// Texture the render collaborator should bind for this fighter.
    pub fn texture_path(self) -> &'static str {
        match self {
            Archetype::Balanced => "assets/textures/fighter_balanced.png",
            Archetype::Heavy => "assets/textures/fighter_heavy.png",
            Archetype::Speedy => "assets/textures/fighter_speedy.png",
            Archetype::Technical => "assets/textures/fighter_technical.png",
        }
    }

    /// Get archetype from index (0-3).
    pub fn from_index(index: u8) -> Option<Archetype> {
        Self::ALL.get(index as usize).copied()
    }
}
