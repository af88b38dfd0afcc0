//! Match-level behavior through the public API.

use std::collections::BTreeMap;

use glam::Vec2;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use brawl::game::{
    archetype::Archetype,
    attack::AttackKind,
    collision::resolve_hits,
    combatant::{Combatant, CombatantState},
    events::GameEventData,
    input::{IntentFrame, IntentSnapshot, MatchRecording},
    platform::{Platform, PlatformKind},
    rules::{MatchMode, MatchSettings},
    state::{GameState, MatchController},
    tick::{replay_match, tick},
};
use brawl::TICK_DT;

fn roster(defender: Archetype, defender_damage: f32) -> BTreeMap<usize, Combatant> {
    let mut roster = BTreeMap::new();
    roster.insert(0, Combatant::new(0, "P1", Archetype::Balanced, Vec2::new(0.0, 1.0), 3));
    let mut defender = Combatant::new(1, "P2", defender, Vec2::new(1.0, 1.0), 3);
    defender.damage_percent = defender_damage;
    roster.insert(1, defender);
    roster
}

fn neutral_hit(defender: Archetype, defender_damage: f32) -> (f32, Combatant) {
    let mut roster = roster(defender, defender_damage);
    assert!(roster.get_mut(&0).unwrap().attack(AttackKind::Neutral));
    let hits = resolve_hits(&mut roster, 1.0, 1.0);
    assert_eq!(hits.len(), 1);
    (hits[0].report.effective_knockback, roster.remove(&1).unwrap())
}

fn random_intent(rng: &mut StdRng) -> IntentFrame {
    let mut frame = IntentFrame::with_movement(rng.gen_range(-1..=1), 0);
    if rng.gen_bool(0.05) {
        frame.set_jump(true);
    }
    if rng.gen_bool(0.1) {
        frame.set_attack(AttackKind::from_index(rng.gen_range(0..8)));
    }
    frame
}

// =============================================================================
// Knockback scenarios
// =============================================================================

#[test]
fn test_weight_divides_knockback() {
    let (balanced, _) = neutral_hit(Archetype::Balanced, 0.0);
    assert!((balanced - 5.0).abs() < 1e-4);

    let (heavy, _) = neutral_hit(Archetype::Heavy, 0.0);
    assert!((heavy - 5.0 / 1.5).abs() < 1e-4);
}

#[test]
fn test_high_knockback_below_damage_threshold_keeps_stock() {
    let (knockback, defender) = neutral_hit(Archetype::Balanced, 100.0);
    assert!((knockback - 30.0).abs() < 1e-3);
    assert_eq!(defender.damage_percent, 105.0);
    assert_eq!(defender.stocks, 3);
    assert_eq!(defender.state, CombatantState::Damaged);
}

#[test]
fn test_launch_past_both_thresholds_costs_stock() {
    let (_, defender) = neutral_hit(Archetype::Balanced, 148.0);
    assert_eq!(defender.stocks, 2);
    assert_eq!(defender.damage_percent, 0.0);
    assert_eq!(defender.state, CombatantState::Falling);
}

// =============================================================================
// Match flow
// =============================================================================

#[test]
fn test_stock_match_won_by_last_fighter_standing() {
    let mut mc = MatchController::default();
    mc.add_player(Archetype::Balanced);
    mc.add_player(Archetype::Speedy);
    mc.start_game();

    let mut ended_with = None;
    let mut events = Vec::new();
    for _ in 0..3 {
        // Throw P2 off the bottom of the stage
        let p2 = mc.combatant_mut(1).unwrap();
        p2.position = Vec2::new(12.0, -9.9);
        p2.velocity = Vec2::new(0.0, -15.0);

        let result = tick(&mut mc, &IntentSnapshot::new(), TICK_DT);
        events.extend(result.events);
        if result.match_ended {
            ended_with = result.winner;
        }
    }

    assert_eq!(ended_with, Some(0));
    assert_eq!(mc.state, GameState::GameOver);
    assert!(mc.combatant(1).unwrap().is_dead());

    let stock_losses = events
        .iter()
        .filter(|e| matches!(e.data, GameEventData::StockLost { slot: 1, .. }))
        .count();
    assert_eq!(stock_losses, 3);
    assert!(events.iter().any(|e| matches!(e.data, GameEventData::Eliminated { slot: 1 })));
    assert!(events
        .iter()
        .any(|e| matches!(e.data, GameEventData::MatchEnded { winner: Some(0), .. })));
}

#[test]
fn test_paused_match_does_not_advance() {
    let mut mc = MatchController::default();
    mc.add_player(Archetype::Technical);
    mc.start_game();
    tick(&mut mc, &IntentSnapshot::new(), TICK_DT);

    mc.pause_game();
    let before = mc.compute_hash();
    let mut inputs = IntentSnapshot::new();
    inputs.insert(0, IntentFrame::with_movement(1, 0).jumping());
    for _ in 0..30 {
        tick(&mut mc, &inputs, TICK_DT);
    }
    assert_eq!(mc.compute_hash(), before);

    mc.resume_game();
    assert!(mc.is_playing());
}

#[test]
fn test_second_attack_rejected_mid_swing() {
    let mut c = Combatant::new(0, "P1", Archetype::Heavy, Vec2::ZERO, 3);
    assert!(c.attack(AttackKind::Side));
    assert!(!c.attack(AttackKind::Neutral));
    assert!(!c.attack(AttackKind::SpecialNeutral));
    assert_eq!(c.active_attack, Some(AttackKind::Side));
}

#[test]
fn test_time_match_prefers_lower_damage() {
    let settings = MatchSettings {
        mode: MatchMode::Time,
        time_limit: 0.5,
        ..MatchSettings::default()
    };
    let mut mc = MatchController::with_settings(settings).unwrap();
    mc.add_player(Archetype::Balanced);
    mc.add_player(Archetype::Balanced);
    mc.start_game();
    mc.combatant_mut(0).unwrap().damage_percent = 40.0;
    mc.combatant_mut(1).unwrap().damage_percent = 10.0;

    let mut winner = None;
    for _ in 0..60 {
        let result = tick(&mut mc, &IntentSnapshot::new(), TICK_DT);
        if result.match_ended {
            winner = result.winner;
            break;
        }
    }
    assert_eq!(winner, Some(1));
}

#[test]
fn test_stamina_match_configured_from_menu() {
    let mut mc = MatchController::default();
    mc.open_character_select().unwrap();
    mc.add_player(Archetype::Balanced);
    mc.add_player(Archetype::Balanced);
    mc.open_stage_select().unwrap();
    let settings = MatchSettings {
        mode: MatchMode::Stamina,
        stamina_amount: 40.0,
        stock_count: 5,
        ..MatchSettings::default()
    };
    mc.set_settings(settings).unwrap();
    mc.start_game();

    assert_eq!(mc.combatant(1).unwrap().stocks, 1);
    assert_eq!(mc.combatant(1).unwrap().stamina_remaining(), Some(40.0));

    mc.combatant_mut(0).unwrap().position = Vec2::new(0.0, 1.55);
    let p2 = mc.combatant_mut(1).unwrap();
    p2.position = Vec2::new(1.0, 1.55);
    p2.damage_percent = 35.0;

    let mut inputs = IntentSnapshot::new();
    inputs.insert(0, IntentFrame::new().attacking(AttackKind::Neutral));
    let result = tick(&mut mc, &inputs, TICK_DT);

    assert!(mc.combatant(1).unwrap().is_dead());
    assert!(result.match_ended);
    assert_eq!(result.winner, Some(0));
}

#[test]
fn test_random_intents_replay_identically() {
    let mut rng = StdRng::seed_from_u64(0xB4A7);
    let archetypes = [
        Archetype::Balanced,
        Archetype::Heavy,
        Archetype::Speedy,
        Archetype::Technical,
    ];

    let mut live = MatchController::default();
    for a in archetypes {
        live.add_player(a);
    }
    live.start_game();

    let mut recording = MatchRecording::new();
    for t in 0..600 {
        let inputs: IntentSnapshot = (0..archetypes.len())
            .map(|slot| (slot, random_intent(&mut rng)))
            .collect();
        recording.record_snapshot(t, &inputs);
        if tick(&mut live, &inputs, TICK_DT).match_ended {
            break;
        }
    }

    let mut replay = MatchController::default();
    for a in archetypes {
        replay.add_player(a);
    }
    replay_match(&mut replay, &recording, TICK_DT);

    assert_eq!(live.compute_hash(), replay.compute_hash());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_damage_never_decreases_without_respawn(
        hits in prop::collection::vec((0u32..40, 0.0f32..30.0), 1..20)
    ) {
        let mut c = Combatant::new(0, "P1", Archetype::Balanced, Vec2::ZERO, 5);
        for (damage, knockback) in hits {
            let before_damage = c.damage_percent;
            let before_stocks = c.stocks;
            let Some(report) = c.take_hit(damage, knockback, Vec2::new(1.0, 0.5)) else {
                break;
            };
            if report.knockout.is_some() {
                prop_assert_eq!(c.stocks, before_stocks - 1);
            } else {
                prop_assert_eq!(c.stocks, before_stocks);
                prop_assert!(c.damage_percent >= before_damage);
            }
        }
    }

    #[test]
    fn prop_knockback_replaces_velocity(
        vx in -50.0f32..50.0,
        vy in -50.0f32..50.0,
        knockback in 0.0f32..20.0,
    ) {
        let mut c = Combatant::new(0, "P1", Archetype::Speedy, Vec2::ZERO, 3);
        c.velocity = Vec2::new(vx, vy);
        let direction = Vec2::new(0.6, 0.8);
        let report = c.take_hit(1, knockback, direction).unwrap();
        let expected = direction * report.effective_knockback;
        prop_assert!((c.velocity - expected).length() < 1e-4);
    }

    #[test]
    fn prop_semi_solid_never_blocks_rising_bodies(
        x in -3.0f32..3.0,
        y in -1.0f32..3.0,
        vy in 0.0f32..20.0,
    ) {
        let platform =
            Platform::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 0.25), PlatformKind::SemiSolid);
        let body = Combatant::new(0, "P1", Archetype::Balanced, Vec2::new(x, y), 3).body();
        prop_assert!(!platform.engages(&body, Vec2::new(0.0, vy)));
    }

    #[test]
    fn prop_pass_through_never_blocks(
        x in -3.0f32..3.0,
        y in -3.0f32..3.0,
        vx in -20.0f32..20.0,
        vy in -20.0f32..20.0,
    ) {
        let platform = Platform::new(Vec2::ZERO, Vec2::new(2.0, 0.5), PlatformKind::PassThrough);
        let body = Combatant::new(0, "P1", Archetype::Heavy, Vec2::new(x, y), 3).body();
        prop_assert!(!platform.engages(&body, Vec2::new(vx, vy)));
        prop_assert!(!platform.blocks(&body));
        prop_assert!(!platform.supports(&body));
    }
}
