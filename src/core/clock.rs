//! Frame Clock
//!
//! Wall-clock delta source for hosts that drive the simulation in real
//! time. The delta is capped so a stall (debugger, window drag) does not
//! produce one huge integration step.

use std::time::{Duration, Instant};

/// Largest step handed to the simulation, in seconds.
pub const MAX_FRAME_STEP: f32 = 0.1;

/// Measures the time between successive frames.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    max_step: f32,
}

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        Self::with_max_step(MAX_FRAME_STEP)
    }

    /// Start a clock with a custom step ceiling.
    pub fn with_max_step(max_step: f32) -> Self {
        Self {
            last: Instant::now(),
            max_step,
        }
    }

    /// Seconds since the previous call (or construction), capped.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        cap_step(elapsed, self.max_step)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a duration to seconds, capped at `max_step`.
pub fn cap_step(elapsed: Duration, max_step: f32) -> f32 {
    elapsed.as_secs_f32().min(max_step)
}
