//! Intent Input
//!
//! The per-tick intent snapshot the host hands to the simulation, and a
//! change-only recording of it for in-process replay.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::hash::{StateHash, StateHasher};
use crate::game::attack::AttackKind;

// =============================================================================
// INTENT FRAME
// =============================================================================

/// One slot's intent for one tick.
///
/// Only the sign of each movement axis is meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentFrame {
    /// Horizontal movement: negative = left, positive = right
    pub move_x: i8,

    /// Vertical movement: negative = down, positive = up
    pub move_y: i8,

    /// Edge-triggered actions (packed bits):
    /// - Bit 0: Jump pressed this tick
    /// - Bit 1: Attack pressed this tick
    pub flags: u8,

    /// Attack requested when the attack bit is set
    pub attack_kind: AttackKind,
}

/// Intents for every slot on one tick, in slot order.
pub type IntentSnapshot = BTreeMap<usize, IntentFrame>;

impl IntentFrame {
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x01;

    /// Attack flag bit
    pub const FLAG_ATTACK: u8 = 0x02;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            move_x: 0,
            move_y: 0,
            flags: 0,
            attack_kind: AttackKind::Neutral,
        }
    }

    /// Create a frame with movement only.
    pub const fn with_movement(move_x: i8, move_y: i8) -> Self {
        Self {
            move_x,
            move_y,
            flags: 0,
            attack_kind: AttackKind::Neutral,
        }
    }

    /// Horizontal direction: -1, 0 or 1.
    #[inline]
    pub fn horizontal(&self) -> i8 {
        self.move_x.signum()
    }

    /// Check if jump was pressed this tick.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// The attack requested this tick, if any.
    #[inline]
    pub fn attack(&self) -> Option<AttackKind> {
        (self.flags & Self::FLAG_ATTACK != 0).then_some(self.attack_kind)
    }

    /// Check if this is an idle frame.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_y == 0 && self.flags == 0
    }

    /// Set jump flag.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_JUMP;
        } else {
            self.flags &= !Self::FLAG_JUMP;
        }
    }

    /// Request an attack, or clear the request with `None`.
    #[inline]
    pub fn set_attack(&mut self, kind: Option<AttackKind>) {
        match kind {
            Some(kind) => {
                self.flags |= Self::FLAG_ATTACK;
                self.attack_kind = kind;
            }
            None => {
                self.flags &= !Self::FLAG_ATTACK;
                self.attack_kind = AttackKind::Neutral;
            }
        }
    }

    /// Builder form of [`IntentFrame::set_jump`].
    pub fn jumping(mut self) -> Self {
        self.set_jump(true);
        self
    }

    /// Builder form of [`IntentFrame::set_attack`].
    pub fn attacking(mut self, kind: AttackKind) -> Self {
        self.set_attack(Some(kind));
        self
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// An intent that took effect on `tick` and holds until the next delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDelta {
    /// Tick when this intent began
    pub tick: u32,
    /// The new intent
    pub frame: IntentFrame,
}

/// Change-only intent recording for one slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentRecording {
    /// Slot recorded
    pub slot: usize,

    /// Only ticks where the intent changed
    deltas: Vec<IntentDelta>,

    #[serde(skip)]
    last_frame: IntentFrame,
}

impl IntentRecording {
    /// Create an empty recording.
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            deltas: Vec::new(),
            last_frame: IntentFrame::new(),
        }
    }

    /// Record the intent for a tick. Stored only if it changed.
    pub fn record(&mut self, tick: u32, frame: IntentFrame) {
        if frame != self.last_frame {
            self.deltas.push(IntentDelta { tick, frame });
            self.last_frame = frame;
        }
    }

    /// Intent in effect at `tick` (idle before the first delta).
    pub fn get_input_at(&self, tick: u32) -> IntentFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            IntentFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// All stored deltas.
    pub fn deltas(&self) -> &[IntentDelta] {
        &self.deltas
    }
}

/// Recordings for every slot of a match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchRecording {
    /// Per-slot recordings
    pub slots: BTreeMap<usize, IntentRecording>,

    /// Number of ticks recorded
    pub tick_count: u32,
}

impl MatchRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick's snapshot.
    pub fn record_snapshot(&mut self, tick: u32, snapshot: &IntentSnapshot) {
        for (slot, frame) in snapshot {
            self.slots
                .entry(*slot)
                .or_insert_with(|| IntentRecording::new(*slot))
                .record(tick, *frame);
        }
        for recording in self.slots.values_mut() {
            if !snapshot.contains_key(&recording.slot) {
                recording.record(tick, IntentFrame::new());
            }
        }
        self.tick_count = self.tick_count.max(tick + 1);
    }

    /// Rebuild the snapshot for `tick`.
    pub fn snapshot_at(&self, tick: u32) -> IntentSnapshot {
        self.slots
            .iter()
            .map(|(slot, recording)| (*slot, recording.get_input_at(tick)))
            .collect()
    }

    /// Iterate `(tick, snapshot)` for every recorded tick, in order.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            tick: 0,
        }
    }

    /// Total stored deltas across all slots.
    pub fn delta_count(&self) -> usize {
        self.slots.values().map(|r| r.deltas().len()).sum()
    }

    /// Fingerprint of the recorded intents.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_intents();
        hasher.update_u32(self.tick_count);
        hasher.update_u64(self.delta_count() as u64);
        for (slot, recording) in &self.slots {
            hasher.update_u32(*slot as u32);
            for delta in recording.deltas() {
                hasher.update_u32(delta.tick);
                hasher.update_u8(delta.frame.move_x as u8);
                hasher.update_u8(delta.frame.move_y as u8);
                hasher.update_u8(delta.frame.flags);
                hasher.update_u8(delta.frame.attack_kind as u8);
            }
        }
        hasher.finalize()
    }
}

/// Rebuilds a match's snapshots tick by tick.
pub struct ReplayIterator<'a> {
    recording: &'a MatchRecording,
    tick: u32,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, IntentSnapshot);

    fn next(&mut self) -> Option<Self::Item> {
        if self.tick >= self.recording.tick_count {
            return None;
        }
        let tick = self.tick;
        self.tick += 1;
        Some((tick, self.recording.snapshot_at(tick)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.recording.tick_count.saturating_sub(self.tick) as usize;
        (left, Some(left))
    }
}

// =============================================================================
// TESTS
// =============================================================================
