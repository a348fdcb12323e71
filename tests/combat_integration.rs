//! Combat controller integration tests
//!
//! Drive the controller the way the game loop does: one tick per frame,
//! sinks drained by the caller, advice arriving through the inbox.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use boss_brain::brain::{AdvisoryTrigger, BrainCoordinator, TacticsAdvisor, TacticsSink};
use boss_brain::combat::{
    AttackEffect, CombatController, ControllerState, PlayerState, TickEvent, WorldSinks,
};
use boss_brain::core::config::CombatConfig;
use boss_brain::core::error::AdvisoryError;
use boss_brain::core::types::Vec2;
use boss_brain::llm::{PlayerPerformanceProfile, PlayerTelemetry};
use boss_brain::tactics::{AttackKind, RawTactics, TacticWeights};
use tokio::runtime::Handle;

const BOSS_X: f32 = 14180.0;

fn boss(seed: u64) -> CombatController {
    CombatController::with_seed(CombatConfig::default(), Vec2::new(BOSS_X, 370.0), seed)
}

fn player() -> PlayerState {
    PlayerState::new(BOSS_X - 400.0, 910.0)
}

/// Run `ticks` frames and count regular attacks per kind
fn count_attacks(ctrl: &mut CombatController, player: &mut PlayerState, ticks: u64) -> [u32; 3] {
    let mut sinks = WorldSinks::new();
    let mut counts = [0u32; 3];
    for _ in 0..ticks {
        if let TickEvent::Attack(kind, _) = ctrl.tick(player, &mut sinks) {
            let slot = AttackKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[slot] += 1;
        }
        sinks.projectiles.clear();
        sinks.hazards.clear();
    }
    counts
}

/// Answers every request with fixed weights, no network
struct FixedAdvisor(TacticWeights);

#[async_trait]
impl TacticsAdvisor for FixedAdvisor {
    async fn request_tactics(
        &self,
        _profile: &PlayerPerformanceProfile,
    ) -> Result<TacticWeights, AdvisoryError> {
        Ok(self.0)
    }
}

#[test]
fn test_weighted_selection_tracks_weights() {
    let mut ctrl = boss(2024);
    ctrl.apply_weights(&TacticWeights::new(8, 1, 1).to_raw()).unwrap();
    let mut target = player();
    target.airborne = true; // keep the player alive for the whole run

    let counts = count_attacks(&mut ctrl, &mut target, 900_000);
    let total: u32 = counts.iter().sum();
    assert!(total >= 10_000, "only {} attacks", total);

    let share = counts[0] as f64 / total as f64;
    assert!((share - 0.8).abs() < 0.02, "projectile share {}", share);
}

#[test]
fn test_zero_weights_never_selected() {
    let mut ctrl = boss(5);
    ctrl.apply_weights(&TacticWeights::new(0, 4, 0).to_raw()).unwrap();
    let mut target = player();

    let counts = count_attacks(&mut ctrl, &mut target, 20_000);
    assert_eq!(counts[0], 0);
    assert_eq!(counts[2], 0);
    assert!(counts[1] > 0);
}

#[test]
fn test_earthquake_respects_airborne_flag() {
    let mut ctrl = boss(9);
    ctrl.apply_weights(&TacticWeights::new(0, 0, 1).to_raw()).unwrap();
    let mut target = player();
    let mut sinks = WorldSinks::new();
    let mut slammed = 0;
    let mut dodged = 0;

    for tick in 0..3_000u64 {
        // Alternate a grounded stretch with an airborne stretch
        target.airborne = (tick / 150) % 2 == 1;
        match ctrl.tick(&mut target, &mut sinks) {
            TickEvent::Attack(AttackKind::Earthquake, AttackEffect::Slammed { damage }) => {
                assert!(!target.airborne);
                assert_eq!(damage, 15);
                slammed += 1;
            }
            TickEvent::Attack(AttackKind::Earthquake, AttackEffect::Dodged) => {
                assert!(target.airborne);
                dodged += 1;
            }
            TickEvent::Attack(kind, effect) => panic!("unexpected {:?} {:?}", kind, effect),
            _ => {}
        }
    }

    assert!(slammed > 0 && dodged > 0);
    assert_eq!(target.hp, PlayerState::MAX_HP - 15 * slammed);
}

#[test]
fn test_ultimate_fires_every_period_regardless_of_weights() {
    let mut ctrl = boss(1);
    ctrl.apply_weights(&TacticWeights::new(0, 0, 0).to_raw()).unwrap();
    let mut target = player();
    target.airborne = true;
    let mut sinks = WorldSinks::new();

    let mut ultimate_ticks = Vec::new();
    for tick in 1..=1_800u64 {
        if ctrl.tick(&mut target, &mut sinks) == TickEvent::Ultimate {
            ultimate_ticks.push(tick);
        }
    }
    assert_eq!(ultimate_ticks, vec![600, 1200, 1800]);
}

#[test]
fn test_snapshot_charging_tracks_windup_window() {
    let mut ctrl = boss(4);
    let mut target = player();
    target.airborne = true;
    let mut sinks = WorldSinks::new();

    for _ in 0..1_200 {
        ctrl.tick(&mut target, &mut sinks);
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.charging, ctrl.ultimate_ticks_remaining() <= 90);
        if snapshot.state == ControllerState::UltimateWindup {
            assert!(snapshot.charging);
        }
        assert_eq!(snapshot.position, Vec2::new(BOSS_X, 370.0));
    }
}

#[test]
fn test_rejected_delivery_keeps_previous_weights() {
    let mut ctrl = boss(6);
    ctrl.apply_weights(&TacticWeights::new(2, 7, 1).to_raw()).unwrap();
    let inbox = ctrl.inbox();

    let mut bogus = RawTactics::new();
    bogus.insert("Projectile".into(), 10);
    inbox.post(bogus);

    let mut target = player();
    let mut sinks = WorldSinks::new();
    ctrl.tick(&mut target, &mut sinks);
    assert_eq!(ctrl.weights(), TacticWeights::new(2, 7, 1));
    assert!(inbox.is_empty());
}

#[test]
fn test_walking_away_pauses_timers() {
    let mut ctrl = boss(8);
    let mut target = player();
    let mut sinks = WorldSinks::new();

    for _ in 0..50 {
        ctrl.tick(&mut target, &mut sinks);
    }
    let cooldown = ctrl.cooldown_ticks_remaining();
    let ultimate = ctrl.ultimate_ticks_remaining();

    target.bounds.origin.x = BOSS_X - 2_000.0;
    for _ in 0..500 {
        assert_eq!(ctrl.tick(&mut target, &mut sinks), TickEvent::Disengaged);
    }
    assert_eq!(ctrl.cooldown_ticks_remaining(), cooldown);
    assert_eq!(ctrl.ultimate_ticks_remaining(), ultimate);

    target.bounds.origin.x = BOSS_X - 400.0;
    ctrl.tick(&mut target, &mut sinks);
    assert_eq!(ctrl.cooldown_ticks_remaining(), cooldown - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_encounter_with_one_shot_trigger() {
    let mut ctrl = boss(12);
    let mut brain = BrainCoordinator::new(
        Arc::new(FixedAdvisor(TacticWeights::new(1, 0, 9))),
        Handle::current(),
        Duration::from_secs(1),
    );
    let mut trigger = AdvisoryTrigger::new();
    let mut telemetry = PlayerTelemetry::new();
    let mut target = player();
    let mut sinks = WorldSinks::new();
    let mut requests = 0;

    for tick in 0..400u64 {
        if tick % 40 == 0 {
            telemetry.record_jump();
        }
        if tick % 20 == 0 {
            telemetry.record_shot();
        }
        // Previous stage cleared from tick 100 on; the trigger must latch once
        if trigger.check(tick >= 100) {
            let sink: Arc<dyn TacticsSink> = Arc::new(ctrl.inbox());
            brain.request_update(telemetry.profile(), sink).unwrap();
            requests += 1;
            brain.settle().await;
        }
        ctrl.tick(&mut target, &mut sinks);
    }

    assert_eq!(requests, 1);
    assert!(trigger.has_fired());
    assert_eq!(ctrl.weights(), TacticWeights::new(1, 0, 9));
}
