//! Hit Detection
//!
//! Hitbox-vs-body pass over every ordered pair of live combatants, in slot
//! order. Hits are applied as they are found, so a defender knocked out
//! earlier in the pass is skipped by later attackers.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::core::geometry::circle_reaches;
use crate::game::attack::Hitbox;
use crate::game::combatant::{Combatant, HitReport};

/// A landed hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    /// Attacking slot
    pub attacker: usize,
    /// Defending slot
    pub defender: usize,
    /// What the hit did to the defender
    pub report: HitReport,
}

/// Check whether a hitbox anchored at `attacker_pos` touches `defender`.
///
/// The defender's half-width widens the circle; height is ignored.
#[inline]
pub fn hitbox_reaches(attacker_pos: Vec2, hitbox: &Hitbox, defender: &Combatant) -> bool {
    circle_reaches(
        attacker_pos + hitbox.offset,
        hitbox.radius,
        defender.position,
        defender.half_extents.x,
    )
}

/// Knockback before defender scaling: base plus growth with current damage.
#[inline]
pub fn raw_knockback(hitbox: &Hitbox, defender_damage: f32, knockback_multiplier: f32) -> f32 {
    hitbox.knockback_base + hitbox.knockback_scaling * defender_damage * knockback_multiplier
}

/// Hitbox damage after the global multiplier, rounded to whole percent.
#[inline]
pub fn scaled_damage(hitbox: &Hitbox, damage_multiplier: f32) -> u32 {
    (hitbox.damage * damage_multiplier).round().max(0.0) as u32
}

/// Find the first hitbox of `attacker` that reaches `defender`, if the pair
/// is eligible this tick.
pub fn check_hit(attacker: &Combatant, defender: &Combatant) -> Option<Hitbox> {
    if attacker.slot == defender.slot || attacker.is_dead() || defender.is_dead() {
        return None;
    }
    if attacker.struck.contains(&defender.slot) {
        return None;
    }

    attacker
        .hitboxes
        .iter()
        .find(|hb| hitbox_reaches(attacker.position, hb, defender))
        .copied()
}

/// Run the hit pass and apply every landed hit.
pub fn resolve_hits(
    roster: &mut BTreeMap<usize, Combatant>,
    damage_multiplier: f32,
    knockback_multiplier: f32,
) -> Vec<HitRecord> {
    let slots: Vec<usize> = roster.keys().copied().collect();
    let mut hits = Vec::new();

    for &attacker_slot in &slots {
        for &defender_slot in &slots {
            if attacker_slot == defender_slot {
                continue;
            }

            let (Some(attacker), Some(defender)) =
                (roster.get(&attacker_slot), roster.get(&defender_slot))
            else {
                continue;
            };
            let Some(hitbox) = check_hit(attacker, defender) else {
                continue;
            };

            let knockback = raw_knockback(&hitbox, defender.damage_percent, knockback_multiplier);
            let damage = scaled_damage(&hitbox, damage_multiplier);

            if let Some(attacker) = roster.get_mut(&attacker_slot) {
                attacker.record_strike(defender_slot);
            }

            let report = roster
                .get_mut(&defender_slot)
                .and_then(|defender| {
                    defender.take_hit(damage, knockback, hitbox.knockback_direction)
                });

            if let Some(report) = report {
                hits.push(HitRecord {
                    attacker: attacker_slot,
                    defender: defender_slot,
                    report,
                });
            }
        }
    }

    hits
}
