//! Combatant Entity
//!
//! A single concrete fighter type: kinematics, damage/stocks, the state
//! machine, attack hitboxes and special cooldowns. Archetype differences
//! are table lookups (see `archetype.rs`), never separate types.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Aabb;
use crate::core::hash::StateHasher;
use crate::game::archetype::{Archetype, Stats};
use crate::game::attack::{build_hitbox, special_profile, AttackKind, Hitbox, SpecialImpulse};

/// Downward acceleration (units/s²).
pub const GRAVITY: f32 = 9.81;

/// Terminal fall speed (units/s).
pub const MAX_FALL_SPEED: f32 = 15.0;

/// Per-tick horizontal velocity factor while grounded.
pub const GROUND_FRICTION: f32 = 0.9;

/// Horizontal speed below which a grounded body counts as stopped.
pub const STOP_THRESHOLD: f32 = 0.1;

/// Stun applied by every hit (seconds).
pub const HITSTUN_DURATION: f32 = 0.5;

/// Damage percent that must be exceeded for a hit to cost a stock.
pub const KO_DAMAGE_THRESHOLD: f32 = 150.0;

/// Effective knockback that must be exceeded for a hit to cost a stock.
pub const KO_KNOCKBACK_THRESHOLD: f32 = 20.0;

/// Fighter body half-extents (1.0 wide, 2.0 tall).
pub const FIGHTER_HALF_EXTENTS: Vec2 = Vec2::new(0.5, 1.0);

// =============================================================================
// FACING
// =============================================================================

/// Horizontal facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Facing {
    /// Facing +X
    #[default]
    Right,
    /// Facing -X
    Left,
}

impl Facing {
    /// +1.0 for right, -1.0 for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Combatant machine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum CombatantState {
    /// Grounded, not moving
    #[default]
    Idle = 0,
    /// Grounded, moving
    Running = 1,
    /// Airborne, rising
    Jumping = 2,
    /// Airborne, falling or level
    Falling = 3,
    /// Ordinary attack in progress
    Attacking = 4,
    /// Special attack in progress
    Special = 5,
    /// Hitstun
    Damaged = 6,
    /// Out of stocks
    Dead = 7,
}

impl CombatantState {
    /// States that lock out ordinary transitions until their timer elapses.
    #[inline]
    pub fn is_forced(self) -> bool {
        matches!(
            self,
            CombatantState::Attacking | CombatantState::Special | CombatantState::Damaged
        )
    }

    /// States that reject a new attack or special.
    #[inline]
    pub fn is_attacking(self) -> bool {
        matches!(self, CombatantState::Attacking | CombatantState::Special)
    }

    /// Seconds per animation frame in this state.
    pub fn frame_period(self) -> f32 {
        match self {
            CombatantState::Idle => 0.5,
            CombatantState::Running => 0.3,
            CombatantState::Jumping | CombatantState::Falling => 0.2,
            CombatantState::Attacking | CombatantState::Special | CombatantState::Damaged => 0.1,
            CombatantState::Dead => 0.5,
        }
    }
}

/// Animation cursor handed to the render collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Time accumulated toward the next frame.
    pub timer: f32,
    /// Frames advanced since the last restart.
    pub frame: u32,
}

impl Animation {
    /// Rewind to the first frame.
    pub fn restart(&mut self) {
        self.timer = 0.0;
        self.frame = 0;
    }

    /// Advance by `dt` using the period of `state`.
    pub fn advance(&mut self, state: CombatantState, dt: f32) {
        self.timer += dt;
        if self.timer >= state.frame_period() {
            self.timer = 0.0;
            self.frame = self.frame.wrapping_add(1);
        }
    }
}

// =============================================================================
// DAMAGE OUTCOMES
// =============================================================================

/// What a knockout did to the combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Knockout {
    /// Lost a stock and returned to the spawn point.
    Respawned {
        /// Stocks left after the loss.
        stocks_remaining: u32,
    },
    /// Lost the last stock.
    Eliminated,
}

/// Result of a landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitReport {
    /// Damage added to the defender.
    pub damage: u32,
    /// Launch speed after damage and weight scaling.
    pub effective_knockback: f32,
    /// Set when the hit cost a stock.
    pub knockout: Option<Knockout>,
}

// =============================================================================
// COMBATANT
// =============================================================================

/// A fighter in the roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Combatant {
    /// Player slot this combatant occupies
    pub slot: usize,

    /// Display name
    pub name: String,

    /// Stat profile
    pub archetype: Archetype,

    /// Body center
    pub position: Vec2,

    /// Current velocity (units/s)
    pub velocity: Vec2,

    /// Body half-extents
    pub half_extents: Vec2,

    /// Accumulated damage percent
    pub damage_percent: f32,

    /// Remaining lives
    pub stocks: u32,

    /// Facing direction
    pub facing: Facing,

    /// Machine state
    pub state: CombatantState,

    /// Remaining time in a forced state
    pub state_timer: f32,

    /// Standing on a platform (set by the stage each tick)
    pub grounded: bool,

    /// Jump allowed while airborne (granted by external mechanics)
    pub can_jump: bool,

    /// Attack volumes for this tick
    pub hitboxes: Vec<Hitbox>,

    /// Attack being performed, re-armed each tick while it lasts
    pub active_attack: Option<AttackKind>,

    /// Slots already struck by the current attack
    pub struck: BTreeSet<usize>,

    /// Remaining cooldown per special kind
    pub cooldowns: BTreeMap<AttackKind, f32>,

    /// Animation cursor
    pub animation: Animation,

    /// Where this combatant returns after losing a stock
    pub spawn_point: Vec2,

    /// Stamina-mode hit points (None outside stamina matches)
    pub stamina: Option<f32>,
}

impl Combatant {
    /// Create a fighter at `position`.
    pub fn new(
        slot: usize,
        name: impl Into<String>,
        archetype: Archetype,
        position: Vec2,
        stocks: u32,
    ) -> Self {
        let cooldowns = AttackKind::SPECIALS.iter().map(|kind| (*kind, 0.0)).collect();

        Self {
            slot,
            name: name.into(),
            archetype,
            position,
            velocity: Vec2::ZERO,
            half_extents: FIGHTER_HALF_EXTENTS,
            damage_percent: 0.0,
            stocks,
            facing: Facing::Right,
            state: CombatantState::Idle,
            state_timer: 0.0,
            grounded: false,
            can_jump: false,
            hitboxes: Vec::new(),
            active_attack: None,
            struck: BTreeSet::new(),
            cooldowns,
            animation: Animation::default(),
            spawn_point: position,
            stamina: None,
        }
    }

    /// Movement stats of the archetype.
    #[inline]
    pub fn stats(&self) -> Stats {
        self.archetype.stats()
    }

    /// Knockback divisor.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.stats().weight
    }

    /// Full body extents (width, height).
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Body box at the current position.
    #[inline]
    pub fn body(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }

    /// Out of stocks.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == CombatantState::Dead
    }

    /// Remaining cooldown for a special kind (0 = ready).
    pub fn cooldown_remaining(&self, kind: AttackKind) -> f32 {
        self.cooldowns.get(&kind).copied().unwrap_or(0.0)
    }

    /// Stamina left in a stamina match.
    pub fn stamina_remaining(&self) -> Option<f32> {
        self.stamina.map(|hp| (hp - self.damage_percent).max(0.0))
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Run left. Ignored while dead or in a forced state.
    pub fn move_left(&mut self) {
        self.run(Facing::Left);
    }

    /// Run right. Ignored while dead or in a forced state.
    pub fn move_right(&mut self) {
        self.run(Facing::Right);
    }

    fn run(&mut self, facing: Facing) {
        if self.is_dead() || self.state.is_forced() {
            return;
        }
        self.velocity.x = facing.sign() * self.stats().move_speed;
        self.facing = facing;
        if self.grounded {
            self.state = CombatantState::Running;
        }
    }

    /// Jump if grounded or a mid-air jump is available.
    ///
    /// Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.is_dead() || self.state.is_forced() {
            return false;
        }
        if !(self.grounded || self.can_jump) {
            return false;
        }

        self.velocity.y = self.stats().jump_impulse;
        self.grounded = false;
        self.can_jump = false;
        self.state = CombatantState::Jumping;
        true
    }

    // =========================================================================
    // Attacks
    // =========================================================================

    /// Start an attack. Special kinds are routed to [`Combatant::special_attack`].
    ///
    /// Returns whether the attack was accepted.
    pub fn attack(&mut self, kind: AttackKind) -> bool {
        if kind.is_special() {
            return self.special_attack(kind);
        }
        if self.is_dead() || self.state.is_attacking() {
            return false;
        }

        self.begin_attack(kind, CombatantState::Attacking, self.archetype.attack_duration());
        true
    }

    /// Start a special attack.
    ///
    /// Rejected for ordinary kinds, while already attacking, or while the
    /// kind's cooldown is running.
    pub fn special_attack(&mut self, kind: AttackKind) -> bool {
        let Some(profile) = special_profile(kind, self.archetype) else {
            return false;
        };
        if self.is_dead() || self.state.is_attacking() {
            return false;
        }
        if self.cooldown_remaining(kind) > 0.0 {
            return false;
        }

        match profile.impulse {
            Some(SpecialImpulse::Vertical { factor }) => {
                self.velocity.y = self.stats().jump_impulse * factor;
            }
            Some(SpecialImpulse::Horizontal { factor }) => {
                self.velocity.x = self.facing.sign() * self.stats().move_speed * factor;
            }
            None => {}
        }

        self.begin_attack(kind, CombatantState::Special, profile.duration);
        self.cooldowns.insert(kind, profile.cooldown);
        true
    }

    fn begin_attack(&mut self, kind: AttackKind, state: CombatantState, duration: f32) {
        self.state = state;
        self.state_timer = duration;
        self.active_attack = Some(kind);
        self.struck.clear();
        self.animation.restart();
        self.hitboxes.push(self.current_hitbox(kind));
    }

    fn current_hitbox(&self, kind: AttackKind) -> Hitbox {
        build_hitbox(kind, self.archetype, self.size(), self.facing)
    }

    /// Mark `defender` as struck by the current attack.
    ///
    /// Returns false if it was already struck.
    pub fn record_strike(&mut self, defender: usize) -> bool {
        self.struck.insert(defender)
    }

    // =========================================================================
    // Damage
    // =========================================================================

    /// Apply a landed hit.
    ///
    /// Launch speed grows with the damage held before this hit and shrinks
    /// with weight. Velocity is replaced, not added to. Returns None if the
    /// combatant is already dead.
    pub fn take_hit(&mut self, damage: u32, knockback: f32, direction: Vec2) -> Option<HitReport> {
        if self.is_dead() {
            return None;
        }

        let prior_damage = self.damage_percent;
        self.damage_percent += damage as f32;

        let effective_knockback = knockback * (1.0 + prior_damage * 0.01) / self.weight();
        self.velocity = direction * effective_knockback;

        self.state = CombatantState::Damaged;
        self.state_timer = HITSTUN_DURATION;
        self.active_attack = None;

        let launched = self.damage_percent > KO_DAMAGE_THRESHOLD
            && effective_knockback > KO_KNOCKBACK_THRESHOLD;
        let exhausted = self.stamina.is_some_and(|hp| self.damage_percent >= hp);

        let knockout = if launched || exhausted {
            self.knock_out()
        } else {
            None
        };

        Some(HitReport {
            damage,
            effective_knockback,
            knockout,
        })
    }

    /// Lose one stock, then respawn or die.
    ///
    /// Returns None if the combatant is already dead.
    pub fn knock_out(&mut self) -> Option<Knockout> {
        if self.is_dead() {
            return None;
        }

        self.stocks = self.stocks.saturating_sub(1);
        if self.stocks == 0 {
            self.state = CombatantState::Dead;
            self.state_timer = 0.0;
            self.velocity = Vec2::ZERO;
            self.hitboxes.clear();
            self.active_attack = None;
            return Some(Knockout::Eliminated);
        }

        self.respawn();
        Some(Knockout::Respawned {
            stocks_remaining: self.stocks,
        })
    }

    /// Return to the spawn point with no damage and no forced state.
    pub fn respawn(&mut self) {
        self.damage_percent = 0.0;
        self.snap_to_spawn();
        self.state = CombatantState::Falling;
        self.state_timer = 0.0;
        self.grounded = false;
        self.hitboxes.clear();
        self.active_attack = None;
    }

    /// Move to the spawn point and stop. Damage and state are untouched.
    pub fn snap_to_spawn(&mut self) {
        self.position = self.spawn_point;
        self.velocity = Vec2::ZERO;
    }

    // =========================================================================
    // Per-tick update
    // =========================================================================

    /// Advance timers, the state machine, gravity and hitboxes by `dt`.
    ///
    /// Position is integrated by the stage, not here.
    pub fn update(&mut self, dt: f32) {
        self.hitboxes.clear();
        if self.is_dead() {
            return;
        }

        if self.state.is_forced() {
            self.state_timer -= dt;
            if self.state_timer <= 0.0 {
                self.state_timer = 0.0;
                self.active_attack = None;
                self.state = if self.grounded {
                    CombatantState::Idle
                } else {
                    CombatantState::Falling
                };
            }
        } else {
            self.state = self.derive_free_state();
        }

        if self.grounded && self.state != CombatantState::Damaged {
            self.velocity.x *= GROUND_FRICTION;
            if self.velocity.x.abs() < STOP_THRESHOLD {
                self.velocity.x = 0.0;
            }
        }

        self.velocity.y -= GRAVITY * dt;
        self.velocity.y = self.velocity.y.max(-MAX_FALL_SPEED);

        for cooldown in self.cooldowns.values_mut() {
            *cooldown = (*cooldown - dt).max(0.0);
        }

        self.animation.advance(self.state, dt);

        if self.state.is_attacking() {
            if let Some(kind) = self.active_attack {
                self.hitboxes.push(self.current_hitbox(kind));
            }
        }
    }

    fn derive_free_state(&self) -> CombatantState {
        match (self.grounded, self.velocity.x.abs() < STOP_THRESHOLD) {
            (true, true) => CombatantState::Idle,
            (true, false) => CombatantState::Running,
            (false, _) if self.velocity.y > 0.0 => CombatantState::Jumping,
            (false, _) => CombatantState::Falling,
        }
    }

    /// Hash this combatant's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.slot as u32);
        hasher.update_u8(self.archetype as u8);
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.damage_percent);
        hasher.update_u32(self.stocks);
        hasher.update_bool(self.facing == Facing::Right);
        hasher.update_u8(self.state as u8);
        hasher.update_f32(self.state_timer);
        hasher.update_bool(self.grounded);
        for (kind, cooldown) in &self.cooldowns {
            hasher.update_u8(*kind as u8);
            hasher.update_f32(*cooldown);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn fighter(archetype: Archetype) -> Combatant {
        Combatant::new(0, "Player 1", archetype, Vec2::new(0.0, 5.0), 3)
    }

    fn grounded(archetype: Archetype) -> Combatant {
        let mut c = fighter(archetype);
        c.grounded = true;
        c
    }

    #[test]
    fn test_new_fighter_defaults() {
        let c = fighter(Archetype::Balanced);
        assert_eq!(c.state, CombatantState::Idle);
        assert_eq!(c.stocks, 3);
        assert_eq!(c.damage_percent, 0.0);
        assert_eq!(c.size(), Vec2::new(1.0, 2.0));
        assert_eq!(c.cooldowns.len(), 4);
        assert!(c.cooldowns.values().all(|cd| *cd == 0.0));
    }

    #[test]
    fn test_move_sets_velocity_and_facing() {
        let mut c = grounded(Archetype::Speedy);
        c.move_left();
        assert_eq!(c.velocity.x, -7.0);
        assert_eq!(c.facing, Facing::Left);
        assert_eq!(c.state, CombatantState::Running);

        c.move_right();
        assert_eq!(c.velocity.x, 7.0);
        assert_eq!(c.facing, Facing::Right);
    }

    #[test]
    fn test_move_suppressed_in_forced_state() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.attack(AttackKind::Neutral));
        c.move_left();
        assert_eq!(c.velocity.x, 0.0);
        assert_eq!(c.facing, Facing::Right);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut c = fighter(Archetype::Balanced);
        assert!(!c.jump());
        assert_eq!(c.velocity.y, 0.0);

        c.grounded = true;
        assert!(c.jump());
        assert_eq!(c.velocity.y, 10.0);
        assert!(!c.grounded);
        assert_eq!(c.state, CombatantState::Jumping);

        // No second jump without the flag
        assert!(!c.jump());

        c.can_jump = true;
        assert!(c.jump());
        assert!(!c.can_jump);
    }

    #[test]
    fn test_gravity_clamps_fall_speed() {
        let mut c = fighter(Archetype::Balanced);
        c.velocity.y = -14.95;
        c.update(DT);
        assert_eq!(c.velocity.y, -MAX_FALL_SPEED);

        c.update(0.1);
        assert_eq!(c.velocity.y, -MAX_FALL_SPEED);
    }

    #[test]
    fn test_ground_friction_snaps_to_zero() {
        let mut c = grounded(Archetype::Balanced);
        c.velocity.x = 5.0;
        c.update(DT);
        assert!((c.velocity.x - 4.5).abs() < 1e-6);

        for _ in 0..100 {
            c.update(DT);
        }
        assert_eq!(c.velocity.x, 0.0);
        assert_eq!(c.state, CombatantState::Idle);
    }

    #[test]
    fn test_free_state_derivation() {
        let mut c = fighter(Archetype::Balanced);
        c.velocity.y = 5.0;
        c.update(DT);
        assert_eq!(c.state, CombatantState::Jumping);

        c.velocity.y = -1.0;
        c.update(DT);
        assert_eq!(c.state, CombatantState::Falling);

        c.grounded = true;
        c.velocity = Vec2::new(3.0, 0.0);
        c.update(DT);
        assert_eq!(c.state, CombatantState::Running);
    }

    #[test]
    fn test_attack_creates_one_hitbox() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.attack(AttackKind::Neutral));
        assert_eq!(c.state, CombatantState::Attacking);
        assert_eq!(c.state_timer, 0.3);
        assert_eq!(c.hitboxes.len(), 1);
        assert_eq!(c.animation.frame, 0);
    }

    #[test]
    fn test_attack_rejected_while_attacking() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.attack(AttackKind::Neutral));
        assert!(!c.attack(AttackKind::Side));
        assert!(!c.special_attack(AttackKind::SpecialNeutral));
        assert_eq!(c.hitboxes.len(), 1);
        assert_eq!(c.active_attack, Some(AttackKind::Neutral));
    }

    #[test]
    fn test_attack_accepted_after_timer_elapses() {
        let mut c = grounded(Archetype::Speedy);
        assert!(c.attack(AttackKind::Neutral));

        // 0.2 s attack; 12 ticks at 60 Hz covers it
        for _ in 0..13 {
            c.update(DT);
        }
        assert_eq!(c.state, CombatantState::Idle);
        assert!(c.attack(AttackKind::Up));
    }

    #[test]
    fn test_hitbox_rearmed_while_attack_lasts() {
        let mut c = grounded(Archetype::Heavy);
        assert!(c.attack(AttackKind::Side));

        c.update(DT);
        assert_eq!(c.state, CombatantState::Attacking);
        assert_eq!(c.hitboxes.len(), 1, "single re-armed hitbox, not accumulated");

        for _ in 0..40 {
            c.update(DT);
        }
        assert!(c.hitboxes.is_empty());
        assert!(c.active_attack.is_none());
    }

    #[test]
    fn test_forced_exit_goes_idle_or_falling() {
        let mut c = fighter(Archetype::Balanced);
        assert!(c.attack(AttackKind::Neutral));
        c.update(0.35);
        assert_eq!(c.state, CombatantState::Falling);

        let mut g = grounded(Archetype::Balanced);
        g.velocity.x = 4.0;
        assert!(g.attack(AttackKind::Neutral));
        g.update(0.35);
        assert_eq!(g.state, CombatantState::Idle);
    }

    #[test]
    fn test_special_cooldown() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.special_attack(AttackKind::SpecialNeutral));
        assert_eq!(c.state, CombatantState::Special);
        assert_eq!(c.cooldown_remaining(AttackKind::SpecialNeutral), 1.0);

        // Let the 0.5 s special end, cooldown still running
        c.update(0.6);
        assert!(!c.state.is_attacking());
        assert!(!c.special_attack(AttackKind::SpecialNeutral));

        // Other specials have their own timers
        assert!(c.special_attack(AttackKind::SpecialDown));
    }

    #[test]
    fn test_cooldowns_floor_at_zero() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.special_attack(AttackKind::SpecialSide));
        for _ in 0..10 {
            c.update(0.1);
        }
        assert_eq!(c.cooldown_remaining(AttackKind::SpecialSide), 0.0);
        assert!(c.special_attack(AttackKind::SpecialSide));
    }

    #[test]
    fn test_special_rejects_ordinary_kind() {
        let mut c = grounded(Archetype::Balanced);
        assert!(!c.special_attack(AttackKind::Neutral));
        assert_eq!(c.state, CombatantState::Idle);
    }

    #[test]
    fn test_attack_routes_special_kinds() {
        let mut c = grounded(Archetype::Balanced);
        assert!(c.attack(AttackKind::SpecialDown));
        assert_eq!(c.state, CombatantState::Special);
        assert!(c.cooldown_remaining(AttackKind::SpecialDown) > 0.0);
    }

    #[test]
    fn test_up_special_is_recovery() {
        let mut c = fighter(Archetype::Balanced);
        assert!(c.special_attack(AttackKind::SpecialUp));
        assert_eq!(c.velocity.y, 15.0);
    }

    #[test]
    fn test_side_special_lunges_forward() {
        let mut c = grounded(Archetype::Balanced);
        c.facing = Facing::Left;
        assert!(c.special_attack(AttackKind::SpecialSide));
        assert_eq!(c.velocity.x, -10.0);
    }

    #[test]
    fn test_take_hit_overwrites_velocity() {
        let mut c = fighter(Archetype::Balanced);
        c.velocity = Vec2::new(3.0, -7.0);
        let dir = Vec2::new(1.0, 0.5);
        let report = c.take_hit(5, 5.0, dir).unwrap();

        assert_eq!(report.effective_knockback, 5.0);
        assert_eq!(c.velocity, dir * 5.0);
        assert_eq!(c.state, CombatantState::Damaged);
        assert_eq!(c.state_timer, HITSTUN_DURATION);
        assert_eq!(c.damage_percent, 5.0);
    }

    #[test]
    fn test_heavy_takes_less_knockback() {
        let mut heavy = fighter(Archetype::Heavy);
        let report = heavy.take_hit(5, 5.0, Vec2::new(1.0, 0.5)).unwrap();
        assert!((report.effective_knockback - 5.0 / 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_high_knockback_without_damage_keeps_stock() {
        let mut c = fighter(Archetype::Balanced);
        c.damage_percent = 100.0;
        let report = c.take_hit(5, 15.0, Vec2::new(1.0, 0.5)).unwrap();

        assert!((report.effective_knockback - 30.0).abs() < 1e-4);
        assert!(report.knockout.is_none());
        assert_eq!(c.stocks, 3);
        assert_eq!(c.damage_percent, 105.0);
    }

    #[test]
    fn test_launch_costs_stock_and_respawns() {
        let mut c = fighter(Archetype::Balanced);
        c.spawn_point = Vec2::new(-5.0, 5.0);
        c.position = Vec2::new(3.0, 1.0);
        c.damage_percent = 148.0;

        let report = c.take_hit(5, 15.0, Vec2::new(1.0, 0.5)).unwrap();
        assert_eq!(report.knockout, Some(Knockout::Respawned { stocks_remaining: 2 }));
        assert_eq!(c.stocks, 2);
        assert_eq!(c.damage_percent, 0.0);
        assert_eq!(c.position, Vec2::new(-5.0, 5.0));
        assert_eq!(c.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_last_stock_kills() {
        let mut c = fighter(Archetype::Balanced);
        c.stocks = 1;
        assert_eq!(c.knock_out(), Some(Knockout::Eliminated));
        assert!(c.is_dead());
        assert_eq!(c.stocks, 0);

        // Dead combatants ignore everything
        assert!(c.knock_out().is_none());
        assert!(c.take_hit(10, 10.0, Vec2::X).is_none());
        assert!(!c.attack(AttackKind::Neutral));
        assert!(!c.jump());
        c.update(DT);
        assert!(c.hitboxes.is_empty());
        assert_eq!(c.stocks, 0);
    }

    #[test]
    fn test_stamina_exhaustion_knocks_out() {
        let mut c = fighter(Archetype::Balanced);
        c.stocks = 1;
        c.stamina = Some(10.0);
        let first = c.take_hit(6, 1.0, Vec2::X).unwrap();
        assert!(first.knockout.is_none());
        assert_eq!(c.stamina_remaining(), Some(4.0));

        let second = c.take_hit(6, 1.0, Vec2::X).unwrap();
        assert_eq!(second.knockout, Some(Knockout::Eliminated));
    }

    #[test]
    fn test_animation_advances_per_state_period() {
        let mut c = grounded(Archetype::Balanced);
        for _ in 0..31 {
            c.update(DT);
        }
        // Idle frames last 0.5 s
        assert_eq!(c.animation.frame, 1);
    }
}
