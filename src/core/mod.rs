//! Core primitives shared by the game modules.
//!
//! Geometry, frame timing and state hashing. Nothing here knows about
//! fighters or matches.

pub mod clock;
pub mod geometry;
pub mod hash;

// Re-export core types
pub use clock::{FrameClock, MAX_FRAME_STEP};
pub use geometry::Aabb;
pub use hash::{compute_state_hash, StateHash};
