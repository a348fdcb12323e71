//! Boss Brain - Headless Encounter Runner
//!
//! Runs the dragon encounter against a scripted player, optionally asking
//! the advisory model for new attack weights partway through, and prints
//! a JSON summary of what the boss did.

use boss_brain::brain::{AdvisoryOutcome, AdvisoryTrigger, BrainCoordinator};
use boss_brain::combat::{AttackEffect, CombatController, PlayerState, TickEvent, WorldSinks};
use boss_brain::core::config::BrainConfig;
use boss_brain::core::error::Result;
use boss_brain::core::types::{Tick, Vec2, TICKS_PER_SECOND};
use boss_brain::llm::{AdvisoryClient, LlmClient, PlayerTelemetry};
use boss_brain::tactics::RawTactics;

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Ground level the player and boss stand on
const FLOOR_Y: f32 = 970.0;
/// Boss left edge
const BOSS_X: f32 = 14180.0;

/// Headless Encounter Runner - scripted player vs advised boss
#[derive(Parser, Debug)]
#[command(name = "boss-brain")]
#[command(about = "Run the boss encounter headless and print a JSON summary")]
struct Args {
    /// Number of simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Random seed for the boss's attack draws
    #[arg(long)]
    seed: Option<u64>,

    /// Tick at which the advisory request is triggered
    #[arg(long, default_value_t = 300)]
    trigger_at: u64,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never contact the advisory service
    #[arg(long)]
    offline: bool,

    /// Pace ticks at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// JSON output structure
#[derive(Serialize, Default)]
struct EncounterSummary {
    ticks: u64,
    seed: u64,
    attacks: BTreeMap<String, u32>,
    ultimates: u32,
    earthquakes_dodged: u32,
    damage_taken: i32,
    player_hp: i32,
    boss_hp: i32,
    final_weights: RawTactics,
    advisory: String,
}

/// Player that walks up to the boss, hops on a fixed rhythm and keeps firing
struct ScriptedPlayer {
    state: PlayerState,
    telemetry: PlayerTelemetry,
}

impl ScriptedPlayer {
    const JUMP_PERIOD: Tick = 90;
    const AIRTIME: Tick = 40;
    const SHOT_PERIOD: Tick = 30;

    fn new() -> Self {
        Self {
            state: PlayerState::new(BOSS_X - 400.0, FLOOR_Y - PlayerState::HEIGHT),
            telemetry: PlayerTelemetry::new(),
        }
    }

    /// Advance one tick; returns true when a shot lands on the boss
    fn step(&mut self, tick: Tick) -> bool {
        let phase = tick % Self::JUMP_PERIOD;
        if phase == 0 {
            self.telemetry.record_jump();
        }
        self.state.airborne = phase < Self::AIRTIME;

        if tick % Self::SHOT_PERIOD == 0 {
            self.telemetry.record_shot();
            // Every third shot connects
            if self.telemetry.shots_fired % 3 == 0 {
                self.telemetry.record_hit();
                return true;
            }
        }
        false
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boss_brain=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BrainConfig::load(path)?,
        None => BrainConfig::default(),
    };
    let advisory = config.advisory.clone().with_env_overrides();
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!("Boss encounter starting (seed {})", seed);

    // Async runtime hosts the advisory request; the tick loop stays on this thread
    let rt = Runtime::new()?;

    let mut controller = CombatController::with_seed(
        config.combat.clone(),
        Vec2::new(BOSS_X, FLOOR_Y - config.combat.boss_height),
        seed,
    );

    let mut brain = if args.offline {
        tracing::warn!("Offline mode - boss keeps its default tactics");
        None
    } else {
        let client = AdvisoryClient::new(LlmClient::new(&advisory)?);
        Some(BrainCoordinator::new(
            Arc::new(client),
            rt.handle().clone(),
            advisory.timeout() + Duration::from_secs(1),
        ))
    };

    let mut trigger = AdvisoryTrigger::new();
    let mut player = ScriptedPlayer::new();
    let mut sinks = WorldSinks::new();
    let mut summary = EncounterSummary {
        ticks: args.ticks,
        seed,
        ..EncounterSummary::default()
    };
    let frame = Duration::from_secs(1) / TICKS_PER_SECOND;

    for tick in 0..args.ticks {
        if player.step(tick) {
            controller.hit_boss(1);
        }

        if trigger.check(tick >= args.trigger_at) {
            if let Some(brain) = brain.as_mut() {
                tracing::info!("Transmitting telemetry to the advisory brain");
                let sink = Arc::new(controller.inbox());
                let _ = brain.request_update(player.telemetry.profile(), sink);
            }
        }

        let hp_before = player.state.hp;
        match controller.tick(&mut player.state, &mut sinks) {
            TickEvent::Attack(kind, effect) => {
                *summary.attacks.entry(kind.name().to_string()).or_default() += 1;
                if effect == AttackEffect::Dodged {
                    summary.earthquakes_dodged += 1;
                }
            }
            TickEvent::Ultimate => summary.ultimates += 1,
            TickEvent::Disengaged | TickEvent::Waiting => {}
        }
        summary.damage_taken += hp_before - player.state.hp;

        // Spawned effects are handed to the renderer, which this runner doesn't have
        sinks.projectiles.clear();
        sinks.hazards.clear();

        if args.realtime {
            std::thread::sleep(frame);
        }
    }

    summary.advisory = match brain.as_mut() {
        None => "offline".into(),
        Some(brain) => match rt.block_on(brain.settle()).or_else(|| brain.last_outcome()) {
            Some(outcome) if outcome.is_applied() => "applied".into(),
            Some(AdvisoryOutcome::Failed(err)) => err.kind().into(),
            _ => "not_requested".into(),
        },
    };

    // Weights that arrived after the last tick
    if let Some(candidate) = controller.inbox().take() {
        let _ = controller.apply_weights(&candidate);
    }

    summary.player_hp = player.state.hp;
    summary.boss_hp = controller.boss().hp;
    summary.final_weights = controller.weights().to_raw();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
