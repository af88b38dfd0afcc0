//! Match Events
//!
//! Events generated during simulation for logging, UI and replay checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::state::GameState;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Eliminations first
    Elimination = 0,
    /// Then stock losses
    StockLoss = 1,
    /// Then hits
    Hit = 2,
    /// Then respawns
    Respawn = 3,
    /// Lowest priority
    Other = 255,
}

/// How a stock was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnockoutCause {
    /// Launched by a hit (or stamina exhausted)
    Hit,
    /// Crossed the blast zone
    BlastZone,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A hitbox connected
    Hit {
        /// Attacking slot
        attacker: usize,
        /// Defending slot
        defender: usize,
        /// Damage added
        damage: u32,
        /// Launch speed
        knockback: f32,
    },

    /// A combatant lost a stock
    StockLost {
        /// Slot
        slot: usize,
        /// What caused it
        cause: KnockoutCause,
        /// Stocks left
        stocks_remaining: u32,
    },

    /// A combatant returned to its spawn point
    Respawned {
        /// Slot
        slot: usize,
        /// Spawn position
        position: Vec2,
    },

    /// A combatant ran out of stocks
    Eliminated {
        /// Slot
        slot: usize,
    },

    /// Match state machine moved
    StateChanged {
        /// Previous state
        from: GameState,
        /// New state
        to: GameState,
    },

    /// Match ended
    MatchEnded {
        /// Winning slot, if any
        winner: Option<usize>,
        /// Ticks simulated
        duration_ticks: u32,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Slot involved (for tie-breaking)
    pub slot: Option<usize>,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, priority: EventPriority, data: GameEventData) -> Self {
        let slot = match &data {
            GameEventData::Hit { defender, .. } => Some(*defender),
            GameEventData::StockLost { slot, .. } => Some(*slot),
            GameEventData::Respawned { slot, .. } => Some(*slot),
            GameEventData::Eliminated { slot } => Some(*slot),
            GameEventData::MatchEnded { winner, .. } => *winner,
            GameEventData::StateChanged { .. } => None,
        };

        Self {
            tick,
            priority,
            slot,
            data,
        }
    }

    /// Create hit event.
    pub fn hit(tick: u32, attacker: usize, defender: usize, damage: u32, knockback: f32) -> Self {
        Self::new(
            tick,
            EventPriority::Hit,
            GameEventData::Hit {
                attacker,
                defender,
                damage,
                knockback,
            },
        )
    }

    /// Create stock lost event.
    pub fn stock_lost(tick: u32, slot: usize, cause: KnockoutCause, stocks_remaining: u32) -> Self {
        Self::new(
            tick,
            EventPriority::StockLoss,
            GameEventData::StockLost {
                slot,
                cause,
                stocks_remaining,
            },
        )
    }

    /// Create respawned event.
    pub fn respawned(tick: u32, slot: usize, position: Vec2) -> Self {
        Self::new(tick, EventPriority::Respawn, GameEventData::Respawned { slot, position })
    }

    /// Create eliminated event.
    pub fn eliminated(tick: u32, slot: usize) -> Self {
        Self::new(tick, EventPriority::Elimination, GameEventData::Eliminated { slot })
    }

    /// Create state changed event.
    pub fn state_changed(tick: u32, from: GameState, to: GameState) -> Self {
        Self::new(tick, EventPriority::Other, GameEventData::StateChanged { from, to })
    }

    /// Create match ended event.
    pub fn match_ended(tick: u32, winner: Option<usize>) -> Self {
        Self::new(
            tick,
            EventPriority::Other,
            GameEventData::MatchEnded {
                winner,
                duration_ticks: tick,
            },
        )
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.priority == other.priority && self.slot == other.slot
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then priority, then slot
        self.tick
            .cmp(&other.tick)
            .then(self.priority.cmp(&other.priority))
            .then(self.slot.cmp(&other.slot))
    }
}
