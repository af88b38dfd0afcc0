//! Match Controller State
//!
//! Roster, ruleset, stage, camera and the match state machine. The per-tick
//! pipeline lives in `tick.rs`; this module owns the data and every
//! operation that happens between ticks.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::game::archetype::Archetype;
use crate::game::camera::Camera;
use crate::game::combatant::{Combatant, CombatantState};
use crate::game::events::GameEvent;
use crate::game::input::IntentFrame;
use crate::game::platform::PlatformKind;
use crate::game::render::{build_frame, RenderFrame};
use crate::game::rules::{MatchMode, MatchSettings, SettingsError};
use crate::game::stage::Stage;

// =============================================================================
// GAME STATE
// =============================================================================

/// Match state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum GameState {
    /// Title menu
    #[default]
    Menu = 0,
    /// Picking fighters
    CharacterSelect = 1,
    /// Picking a stage
    StageSelect = 2,
    /// Simulation running
    Playing = 3,
    /// Simulation suspended
    Paused = 4,
    /// Match over
    GameOver = 5,
}

/// Errors from match setup and menu navigation.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Menu transition not allowed from the current state
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current state
        from: GameState,
        /// Requested state
        to: GameState,
    },

    /// Stage edits are only allowed outside a match
    #[error("stage cannot change while {0:?}")]
    StageLocked(GameState),

    /// Ruleset rejected
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

// =============================================================================
// MATCH CONTROLLER
// =============================================================================

/// Complete state of a match.
///
/// Uses BTreeMap for deterministic slot order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchController {
    /// Ruleset
    pub settings: MatchSettings,

    /// Current stage
    pub stage: Stage,

    /// Combatants keyed by slot
    pub roster: BTreeMap<usize, Combatant>,

    /// Framing derived from the roster each tick
    pub camera: Camera,

    /// State machine
    pub state: GameState,

    /// Ticks simulated since `start_game`
    pub tick: u32,

    /// Match clock (seconds)
    pub elapsed: f32,

    /// Set once the match has ended
    pub finished: bool,

    /// Winner decided at match end
    pub winner: Option<usize>,

    /// Events generated since the last drain
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl Default for MatchController {
    fn default() -> Self {
        Self::new(MatchSettings::default(), Stage::default_layout())
    }
}

impl MatchController {
    /// Create a controller in the menu.
    pub fn new(settings: MatchSettings, stage: Stage) -> Self {
        Self {
            settings,
            stage,
            roster: BTreeMap::new(),
            camera: Camera::default(),
            state: GameState::Menu,
            tick: 0,
            elapsed: 0.0,
            finished: false,
            winner: None,
            pending_events: Vec::new(),
        }
    }

    /// Create a controller after validating the ruleset.
    pub fn with_settings(settings: MatchSettings) -> Result<Self, MatchError> {
        settings.validate()?;
        Ok(Self::new(settings, Stage::default_layout()))
    }

    // =========================================================================
    // Roster
    // =========================================================================

    /// Add a fighter in the lowest free slot. Returns the slot.
    pub fn add_player(&mut self, archetype: Archetype) -> usize {
        let slot = (0..).find(|s| !self.roster.contains_key(s)).unwrap_or(self.roster.len());
        let spawn = self.stage.spawn_position(slot);

        let mut combatant = Combatant::new(
            slot,
            format!("Player {}", slot + 1),
            archetype,
            spawn,
            self.settings.starting_stocks(),
        );
        combatant.stamina = self.settings.stamina();

        info!(slot, ?archetype, "Player added");
        self.roster.insert(slot, combatant);
        slot
    }

    /// Remove a fighter. Unknown slots are ignored.
    pub fn remove_player(&mut self, slot: usize) -> Option<Combatant> {
        let removed = self.roster.remove(&slot);
        if removed.is_some() {
            info!(slot, "Player removed");
        }
        removed
    }

    /// Move a fighter back to its spawn point and stop it.
    ///
    /// Damage, stocks and state are untouched. Unknown slots are ignored.
    pub fn respawn_player(&mut self, slot: usize) {
        let spawn = self.stage.spawn_position(slot);
        if let Some(combatant) = self.roster.get_mut(&slot) {
            combatant.spawn_point = spawn;
            combatant.snap_to_spawn();
        }
    }

    /// Get a fighter by slot.
    pub fn combatant(&self, slot: usize) -> Option<&Combatant> {
        self.roster.get(&slot)
    }

    /// Get a fighter mutably by slot.
    pub fn combatant_mut(&mut self, slot: usize) -> Option<&mut Combatant> {
        self.roster.get_mut(&slot)
    }

    /// Apply one slot's intent.
    ///
    /// Ignored outside `Playing` and for unknown slots.
    pub fn process_player_input(&mut self, slot: usize, intent: &IntentFrame) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(combatant) = self.roster.get_mut(&slot) else {
            return;
        };

        match intent.horizontal() {
            -1 => combatant.move_left(),
            1 => combatant.move_right(),
            _ => {}
        }

        if intent.jump_pressed() {
            combatant.jump();
        }

        if let Some(kind) = intent.attack() {
            if !combatant.attack(kind) {
                debug!(slot, ?kind, state = ?combatant.state, "Attack rejected");
            }
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Replace the ruleset. Only allowed outside a match.
    pub fn set_settings(&mut self, settings: MatchSettings) -> Result<(), MatchError> {
        self.ensure_stage_unlocked()?;
        settings.validate()?;
        self.settings = settings;
        self.apply_ruleset();
        Ok(())
    }

    /// Give every fighter the ruleset's stocks and stamina.
    fn apply_ruleset(&mut self) {
        let stocks = self.settings.starting_stocks();
        let stamina = self.settings.stamina();
        for combatant in self.roster.values_mut() {
            combatant.stocks = stocks;
            combatant.stamina = stamina;
        }
    }

    /// Swap the stage. Only allowed outside a match.
    pub fn select_stage(&mut self, stage: Stage) -> Result<(), MatchError> {
        self.ensure_stage_unlocked()?;
        info!(stage = %stage.name, "Stage selected");
        self.stage = stage;
        Ok(())
    }

    /// Add a platform to the current stage. Only allowed outside a match.
    pub fn add_platform(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        kind: PlatformKind,
    ) -> Result<(), MatchError> {
        self.ensure_stage_unlocked()?;
        self.stage.add_platform(center, half_extents, kind);
        Ok(())
    }

    fn ensure_stage_unlocked(&self) -> Result<(), MatchError> {
        match self.state {
            GameState::Playing | GameState::Paused => Err(MatchError::StageLocked(self.state)),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // State machine
    // =========================================================================

    fn transition(&mut self, to: GameState) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        debug!(?from, ?to, "Game state changed");
        self.push_event(GameEvent::state_changed(self.tick, from, to));
    }

    fn checked_transition(
        &mut self,
        allowed_from: &[GameState],
        to: GameState,
    ) -> Result<(), MatchError> {
        if !allowed_from.contains(&self.state) {
            return Err(MatchError::InvalidTransition { from: self.state, to });
        }
        self.transition(to);
        Ok(())
    }

    /// Menu → CharacterSelect.
    pub fn open_character_select(&mut self) -> Result<(), MatchError> {
        self.checked_transition(&[GameState::Menu], GameState::CharacterSelect)
    }

    /// CharacterSelect → StageSelect.
    pub fn open_stage_select(&mut self) -> Result<(), MatchError> {
        self.checked_transition(&[GameState::CharacterSelect], GameState::StageSelect)
    }

    /// Back to the menu from anywhere except a running match.
    pub fn return_to_menu(&mut self) -> Result<(), MatchError> {
        self.checked_transition(
            &[
                GameState::Menu,
                GameState::CharacterSelect,
                GameState::StageSelect,
                GameState::Paused,
                GameState::GameOver,
            ],
            GameState::Menu,
        )
    }

    /// Reset the clock, restore every fighter's stocks and stamina, put
    /// them on their spawn points and start simulating. Allowed from any
    /// state.
    pub fn start_game(&mut self) {
        self.tick = 0;
        self.elapsed = 0.0;
        self.finished = false;
        self.winner = None;
        self.apply_ruleset();

        for (slot, combatant) in self.roster.iter_mut() {
            if combatant.is_dead() {
                combatant.state = CombatantState::Falling;
            }
            combatant.spawn_point = self.stage.spawn_position(*slot);
            combatant.snap_to_spawn();
        }

        info!(
            players = self.roster.len(),
            mode = ?self.settings.mode,
            stage = %self.stage.name,
            "Match started"
        );
        self.transition(GameState::Playing);
    }

    /// Playing → Paused. Ignored in any other state.
    pub fn pause_game(&mut self) {
        if self.state == GameState::Playing {
            self.transition(GameState::Paused);
        }
    }

    /// Paused → Playing. Ignored in any other state.
    pub fn resume_game(&mut self) {
        if self.state == GameState::Paused {
            self.transition(GameState::Playing);
        }
    }

    /// Force the match over.
    pub fn end_game(&mut self) {
        self.finish();
    }

    /// Mark the match finished, decide the winner and enter GameOver.
    pub(crate) fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.winner = self.decide_winner();
            info!(winner = ?self.winner, ticks = self.tick, "Match ended");
            self.push_event(GameEvent::match_ended(self.tick, self.winner));
        }
        self.transition(GameState::GameOver);
    }

    /// Whether the match is being simulated.
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Fighters with at least one stock.
    pub fn players_with_stocks(&self) -> usize {
        self.roster.values().filter(|c| c.stocks > 0).count()
    }

    /// Whether the match-end condition for the mode holds.
    pub fn end_condition_met(&self) -> bool {
        match self.settings.mode {
            MatchMode::Stock | MatchMode::Stamina => self.players_with_stocks() <= 1,
            MatchMode::Time => self.elapsed >= self.settings.time_limit,
        }
    }

    /// Winner of a finished match, if any.
    pub fn winning_player(&self) -> Option<usize> {
        if !self.finished {
            return None;
        }
        self.winner
    }

    /// Winner under the current mode's rule.
    ///
    /// Stock and stamina: lowest slot with stocks left. Time: most stocks,
    /// then least damage, then lowest slot; dead fighters never win.
    pub fn decide_winner(&self) -> Option<usize> {
        let mut alive = self.roster.values().filter(|c| c.stocks > 0 && !c.is_dead());

        match self.settings.mode {
            MatchMode::Stock | MatchMode::Stamina => alive.next().map(|c| c.slot),
            MatchMode::Time => alive
                .min_by(|a, b| {
                    b.stocks
                        .cmp(&a.stocks)
                        .then(a.damage_percent.total_cmp(&b.damage_percent))
                        .then(a.slot.cmp(&b.slot))
                })
                .map(|c| c.slot),
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Render frame for the settled state.
    pub fn render_frame(&self) -> RenderFrame {
        build_frame(&self.stage, &self.roster, &self.camera)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_u8(self.state as u8);
            hasher.update_u8(self.settings.mode as u8);
            hasher.update_f32(self.elapsed);
            hasher.update_bool(self.finished);
            hasher.update_u32(self.winner.map_or(u32::MAX, |w| w as u32));

            // Slot order (BTreeMap guarantees this)
            for combatant in self.roster.values() {
                combatant.hash_into(hasher);
            }

            hasher.update_f32(self.camera.eye.x);
            hasher.update_f32(self.camera.eye.y);
            hasher.update_f32(self.camera.zoom);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
