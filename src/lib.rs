//! # Brawl Core
//!
//! Combat and physics simulation for a 2D platform fighter.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BRAWL CORE                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  ├── geometry.rs - Axis-aligned boxes, reach tests           │
//! │  ├── clock.rs    - Frame delta with a step cap               │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Match simulation                          │
//! │  ├── combatant.rs- Fighter body and state machine            │
//! │  ├── attack.rs   - Attacks, hitboxes, specials               │
//! │  ├── stage.rs    - Platforms, spawns, blast zone             │
//! │  ├── collision.rs- Hit resolution                            │
//! │  ├── state.rs    - Match controller                          │
//! │  ├── tick.rs     - Per-tick pipeline                         │
//! │  ├── camera.rs   - Framing                                   │
//! │  └── render.rs   - Render frames for the host                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! A tick depends only on the controller state, the intent snapshot and
//! `dt`. Slots are kept in BTreeMaps so every pass runs in slot order.
//! Feeding a [`MatchRecording`] back through [`game::tick::replay_match`]
//! with the same `dt` reproduces the same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::geometry::Aabb;
pub use game::input::{IntentFrame, IntentSnapshot, MatchRecording};
pub use game::state::{GameState, MatchController};
pub use game::tick::{tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed simulation rate used by the demo and replays (Hz)
pub const TICK_RATE: u32 = 60;

/// Step length at [`TICK_RATE`] (seconds)
pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;
