//! Simulation Tick
//!
//! One call advances a playing match by one step. Order within a tick:
//! intents, match clock, stage pass, combatant updates, hit pass, match-end
//! check, camera. Outside `Playing` a tick changes nothing.

use tracing::{debug, info};

#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::clock::MAX_FRAME_STEP;
use crate::game::collision::{resolve_hits, HitRecord};
use crate::game::combatant::Knockout;
use crate::game::events::{GameEvent, KnockoutCause};
use crate::game::input::{IntentSnapshot, MatchRecording};
use crate::game::rules::MatchMode;
use crate::game::state::{GameState, MatchController};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Hits landed this tick
    pub hits: Vec<HitRecord>,
    /// Whether the match has ended
    pub match_ended: bool,
    /// Winner (if the match ended with one)
    pub winner: Option<usize>,
}

/// Run one simulation tick.
///
/// `dt` is clamped to `[0, MAX_FRAME_STEP]`.
pub fn tick(mc: &mut MatchController, inputs: &IntentSnapshot, dt: f32) -> TickResult {
    let mut result = TickResult::default();

    if mc.state != GameState::Playing {
        result.match_ended = mc.finished;
        result.winner = mc.winning_player();
        return result;
    }

    let dt = dt.max(0.0).min(MAX_FRAME_STEP);
    mc.tick += 1;

    // 1. Intents, in slot order
    for (slot, intent) in inputs {
        mc.process_player_input(*slot, intent);
    }

    // 2. Match clock
    advance_clock(mc, dt);

    // 3. Platforms, grounding, blast zone
    run_stage_pass(mc, dt);

    // 4. Combatant state machines
    for combatant in mc.roster.values_mut() {
        combatant.update(dt);
    }

    // 5. Hitbox-vs-body
    result.hits = process_hits(mc);

    // 6. End conditions
    check_end_conditions(mc);

    // 7. Camera
    update_camera(mc);

    #[cfg(feature = "debug-tracing")]
    trace!(
        tick = mc.tick,
        elapsed = mc.elapsed,
        hash = %hex::encode(&mc.compute_hash()[..8]),
        "Tick complete"
    );

    result.events = mc.take_events();
    result.match_ended = mc.finished;
    result.winner = mc.winning_player();
    result
}

/// Advance the match clock. Only timed matches keep time.
fn advance_clock(mc: &mut MatchController, dt: f32) {
    if mc.settings.mode == MatchMode::Time && !mc.finished {
        mc.elapsed += dt;
    }
}

/// Move every live combatant against the stage and handle blast-zone exits.
fn run_stage_pass(mc: &mut MatchController, dt: f32) {
    let mut knockouts = Vec::new();

    for (slot, combatant) in mc.roster.iter_mut() {
        if let Some(ko) = mc.stage.step(combatant, dt) {
            knockouts.push((*slot, ko));
        }
    }

    for (slot, ko) in knockouts {
        record_knockout(mc, slot, KnockoutCause::BlastZone, ko);
    }
}

/// Resolve hits and report them.
fn process_hits(mc: &mut MatchController) -> Vec<HitRecord> {
    let hits = resolve_hits(
        &mut mc.roster,
        mc.settings.damage_multiplier,
        mc.settings.knockback_multiplier,
    );

    for hit in &hits {
        debug!(
            attacker = hit.attacker,
            defender = hit.defender,
            damage = hit.report.damage,
            knockback = hit.report.effective_knockback,
            "Hit"
        );
        mc.push_event(GameEvent::hit(
            mc.tick,
            hit.attacker,
            hit.defender,
            hit.report.damage,
            hit.report.effective_knockback,
        ));

        if let Some(ko) = hit.report.knockout {
            record_knockout(mc, hit.defender, KnockoutCause::Hit, ko);
        }
    }

    hits
}

/// Emit the events and log line for a lost stock.
fn record_knockout(mc: &mut MatchController, slot: usize, cause: KnockoutCause, ko: Knockout) {
    let tick = mc.tick;
    match ko {
        Knockout::Respawned { stocks_remaining } => {
            info!(slot, ?cause, stocks_remaining, "Stock lost");
            mc.push_event(GameEvent::stock_lost(tick, slot, cause, stocks_remaining));
            if let Some(combatant) = mc.roster.get(&slot) {
                let position = combatant.position;
                mc.push_event(GameEvent::respawned(tick, slot, position));
            }
        }
        Knockout::Eliminated => {
            info!(slot, ?cause, "Eliminated");
            mc.push_event(GameEvent::stock_lost(tick, slot, cause, 0));
            mc.push_event(GameEvent::eliminated(tick, slot));
        }
    }
}

/// End the match once the mode's condition holds.
fn check_end_conditions(mc: &mut MatchController) {
    if mc.finished {
        return;
    }
    if mc.end_condition_met() {
        mc.finish();
    }
}

/// Frame every live combatant.
fn update_camera(mc: &mut MatchController) {
    let positions = mc
        .roster
        .values()
        .filter(|c| !c.is_dead())
        .map(|c| c.position);
    mc.camera.frame(positions);
}

/// Start a match and run it from a recording.
///
/// Stops early if the match ends. Returns every event generated.
pub fn replay_match(
    mc: &mut MatchController,
    recording: &MatchRecording,
    dt: f32,
) -> Vec<GameEvent> {
    let mut all_events = Vec::new();

    mc.start_game();
    all_events.extend(mc.take_events());

    for (_, inputs) in recording.replay_iter() {
        let result = tick(mc, &inputs, dt);
        all_events.extend(result.events);

        if result.match_ended {
            break;
        }
    }

    all_events
}
