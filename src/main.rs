//! Brawl Simulator
//!
//! Headless driver for the combat core. Runs a scripted match, then
//! replays the recorded intents and checks the state hashes agree.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use brawl::{
    game::{
        archetype::Archetype,
        attack::AttackKind,
        events::GameEventData,
        input::{IntentFrame, IntentSnapshot, MatchRecording},
        rules::MatchSettings,
        state::MatchController,
        tick::{replay_match, tick},
    },
    TICK_DT, TICK_RATE, VERSION,
};

/// Longest demo match (two minutes of simulated time).
const MAX_DEMO_TICKS: u32 = 120 * TICK_RATE;

/// Distance at which the script starts swinging.
const ATTACK_RANGE: f32 = 1.5;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Brawl Simulator v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {}", path))?;
            MatchSettings::from_json(&json)
                .with_context(|| format!("parsing settings in {}", path))?
        }
        None => MatchSettings::default(),
    };
    info!("Mode: {:?}, stocks: {}", settings.mode, settings.starting_stocks());

    demo_match(settings)
}

/// Build the demo roster.
fn new_match(settings: &MatchSettings) -> Result<MatchController> {
    let mut mc = MatchController::with_settings(settings.clone())?;
    mc.add_player(Archetype::Balanced);
    mc.add_player(Archetype::Heavy);
    Ok(mc)
}

/// Scripted intent: walk toward the nearest opponent, swing when close,
/// hop when they are above.
fn scripted_intent(mc: &MatchController, slot: usize, t: u32) -> IntentFrame {
    let Some(me) = mc.combatant(slot) else {
        return IntentFrame::new();
    };

    let target = mc
        .roster
        .values()
        .filter(|c| c.slot != slot && !c.is_dead())
        .min_by(|a, b| {
            a.position
                .distance_squared(me.position)
                .total_cmp(&b.position.distance_squared(me.position))
        });
    let Some(target) = target else {
        return IntentFrame::new();
    };

    let offset = target.position - me.position;
    let mut frame = IntentFrame::with_movement(if offset.x < 0.0 { -1 } else { 1 }, 0);

    if offset.length() < ATTACK_RANGE {
        frame.move_x = 0;
        let kind = match (t / 30 + slot as u32) % 4 {
            0 => AttackKind::Neutral,
            1 => AttackKind::Side,
            2 => AttackKind::SpecialSide,
            _ => AttackKind::Up,
        };
        frame.set_attack(Some(kind));
    } else if offset.y > 1.5 && t % 45 == 0 {
        frame.set_jump(true);
    }

    frame
}

/// Run the scripted match, then verify replay determinism.
fn demo_match(settings: MatchSettings) -> Result<()> {
    info!("=== Starting Demo Match ===");

    let mut mc = new_match(&settings)?;
    for c in mc.roster.values() {
        info!("Slot {}: {} ({:?})", c.slot, c.name, c.archetype);
    }

    mc.start_game();
    mc.take_events();

    let mut recording = MatchRecording::new();
    let mut total_hits = 0usize;
    let mut total_events = 0usize;

    for t in 0..MAX_DEMO_TICKS {
        let inputs: IntentSnapshot = mc
            .roster
            .keys()
            .map(|slot| (*slot, scripted_intent(&mc, *slot, t)))
            .collect();
        recording.record_snapshot(t, &inputs);

        let result = tick(&mut mc, &inputs, TICK_DT);
        total_hits += result.hits.len();
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::StockLost {
                    slot,
                    cause,
                    stocks_remaining,
                } => {
                    info!(
                        "Tick {}: slot {} lost a stock ({:?}), {} left",
                        t, slot, cause, stocks_remaining
                    );
                }
                GameEventData::Eliminated { slot } => {
                    info!("Tick {}: slot {} eliminated", t, slot);
                }
                GameEventData::MatchEnded { winner, .. } => {
                    info!("Tick {}: match ended, winner {:?}", t, winner);
                }
                _ => {}
            }
        }

        if t % (10 * TICK_RATE) == 0 {
            let damage: Vec<String> = mc
                .roster
                .values()
                .map(|c| format!("{}={:.0}%", c.name, c.damage_percent))
                .collect();
            info!("Tick {}: {}", t, damage.join(" "));
        }

        if result.match_ended {
            break;
        }
    }

    info!("=== Match Results ===");
    let hash = mc.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Winner: {:?}", mc.winning_player());
    info!("Hits: {}, events: {}", total_hits, total_events);
    info!(
        "Recorded {} ticks as {} intent changes (hash {})",
        recording.tick_count,
        recording.delta_count(),
        hex::encode(&recording.compute_hash()[..8])
    );

    info!("=== Verifying Determinism ===");
    let mut replay = new_match(&settings)?;
    replay_match(&mut replay, &recording, TICK_DT);
    let replay_hash = replay.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("replay diverged from the live match");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
