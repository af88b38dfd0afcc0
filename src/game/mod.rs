//! Game Logic Module
//!
//! Everything that advances a match. Nothing here draws, plays audio or
//! reads devices; hosts feed intents in and read state, events and render
//! frames out.
//!
//! ## Module Structure
//!
//! - `archetype`: Fighter archetypes and their stat tables
//! - `attack`: Attack kinds, hitboxes and special-move profiles
//! - `combatant`: Per-fighter physics body and state machine
//! - `platform`: Platform collision policies
//! - `stage`: Platform set, spawns, blast zone and motion resolution
//! - `collision`: Hitbox-vs-body hit resolution
//! - `camera`: Framing of live fighters
//! - `render`: Render frames handed to the host
//! - `input`: Per-tick intents and intent recordings
//! - `rules`: Match modes and settings
//! - `state`: Match controller and state machine
//! - `tick`: Per-tick simulation pipeline
//! - `events`: Game events for hosts and replay checks

pub mod archetype;
pub mod attack;
pub mod camera;
pub mod collision;
pub mod combatant;
pub mod events;
pub mod input;
pub mod platform;
pub mod render;
pub mod rules;
pub mod stage;
pub mod state;
pub mod tick;

// Re-export key types
pub use archetype::Archetype;
pub use attack::{AttackKind, Hitbox};
pub use camera::Camera;
pub use combatant::{Combatant, CombatantState, Facing, Knockout};
pub use events::{GameEvent, GameEventData};
pub use input::{IntentFrame, IntentSnapshot, MatchRecording};
pub use platform::{Platform, PlatformKind};
pub use render::{RenderFrame, RenderSink};
pub use rules::{MatchMode, MatchSettings};
pub use stage::Stage;
pub use state::{GameState, MatchController, MatchError};
pub use tick::TickResult;
