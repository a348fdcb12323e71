//! Boss combat controller - weighted attack selection on cooldown timers
//!
//! Each tick, in priority order:
//! 1. Pick up advised weights posted to the inbox
//! 2. Do nothing if the boss is defeated or the player is out of range
//! 3. Fire the ultimate when its timer runs out (skips step 4 this tick)
//! 4. Fire a weighted-random regular attack when the cooldown runs out

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::brain::inbox::TacticsInbox;
use crate::combat::world::{Hazard, PlayerState, Projectile, ProjectileTag, WorldSinks};
use crate::core::config::CombatConfig;
use crate::core::error::AdvisoryError;
use crate::core::types::{Rect, Vec2};
use crate::tactics::attack::AttackKind;
use crate::tactics::validator::validate;
use crate::tactics::weights::{RawTactics, TacticWeights};

/// Where the controller is in its attack cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// Disengaged: boss defeated or player out of range
    Idle,
    /// Waiting out the regular cooldown
    Cooldown,
    /// Ultimate is about to fire; render shows the boss charging
    UltimateWindup,
    /// A regular attack fired this tick
    Executing(AttackKind),
}

/// What a regular attack did to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackEffect {
    ProjectileLaunched,
    HazardDropped,
    Slammed { damage: i32 },
    Dodged,
}

/// Result of one call to [`CombatController::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Disengaged,
    Waiting,
    Ultimate,
    Attack(AttackKind, AttackEffect),
}

/// The boss's own body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossBody {
    pub bounds: Rect,
    pub hp: i32,
}

impl BossBody {
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

/// Render payload handed back to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub position: Vec2,
    pub hp: i32,
    pub state: ControllerState,
    /// Boss is winding up its ultimate
    pub charging: bool,
}

pub struct CombatController {
    config: CombatConfig,
    boss: BossBody,
    weights: TacticWeights,
    cooldown_ticks_remaining: u32,
    ultimate_ticks_remaining: u32,
    selected_attack: Option<AttackKind>,
    state: ControllerState,
    inbox: TacticsInbox,
    rng: ChaCha8Rng,
}

impl CombatController {
    /// Create a controller with the default seed
    pub fn new(config: CombatConfig, position: Vec2) -> Self {
        Self::with_seed(config, position, 42) // Deterministic for testing
    }

    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(config: CombatConfig, position: Vec2, seed: u64) -> Self {
        let boss = BossBody {
            bounds: Rect::new(position.x, position.y, config.boss_width, config.boss_height),
            hp: config.boss_hp,
        };
        Self {
            cooldown_ticks_remaining: config.initial_delay,
            ultimate_ticks_remaining: config.ultimate_period,
            config,
            boss,
            weights: TacticWeights::default(),
            selected_attack: None,
            state: ControllerState::Cooldown,
            inbox: TacticsInbox::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Handle for the advisory side to deliver weights through
    pub fn inbox(&self) -> TacticsInbox {
        self.inbox.clone()
    }

    pub fn weights(&self) -> TacticWeights {
        self.weights
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn selected_attack(&self) -> Option<AttackKind> {
        self.selected_attack
    }

    pub fn cooldown_ticks_remaining(&self) -> u32 {
        self.cooldown_ticks_remaining
    }

    pub fn ultimate_ticks_remaining(&self) -> u32 {
        self.ultimate_ticks_remaining
    }

    pub fn boss(&self) -> &BossBody {
        &self.boss
    }

    /// Damage the boss (player shots); returns true if this defeated it
    pub fn hit_boss(&mut self, damage: i32) -> bool {
        let was_alive = !self.boss.is_defeated();
        self.boss.hp -= damage;
        was_alive && self.boss.is_defeated()
    }

    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            position: self.boss.bounds.origin,
            hp: self.boss.hp,
            state: self.state,
            charging: self.is_charging(),
        }
    }

    /// Engaged and inside the windup window, even on ticks a regular attack fires
    pub fn is_charging(&self) -> bool {
        self.state != ControllerState::Idle
            && self.ultimate_ticks_remaining <= self.config.ultimate_windup
    }

    /// Replace the weights if `candidate` passes validation.
    ///
    /// On rejection the current weights are left exactly as they were.
    pub fn apply_weights(&mut self, candidate: &RawTactics) -> Result<(), AdvisoryError> {
        match validate(candidate) {
            Ok(weights) => {
                info!("Boss tactics updated: {} -> {}", self.weights, weights);
                self.weights = weights;
                Ok(())
            }
            Err(err) => {
                warn!("Rejected invalid tactics for boss: {}", err);
                Err(err)
            }
        }
    }

    /// Advance one simulation tick
    pub fn tick(&mut self, player: &mut PlayerState, sinks: &mut WorldSinks) -> TickEvent {
        if let Some(candidate) = self.inbox.take() {
            let _ = self.apply_weights(&candidate);
        }

        if !self.is_engaged(player) {
            self.set_state(ControllerState::Idle);
            return TickEvent::Disengaged;
        }

        // Ultimate pre-empts regular attacks
        self.ultimate_ticks_remaining = self.ultimate_ticks_remaining.saturating_sub(1);
        if self.ultimate_ticks_remaining == 0 {
            self.fire_ultimate(sinks);
            self.ultimate_ticks_remaining = self.config.ultimate_period;
            self.set_state(ControllerState::Cooldown);
            return TickEvent::Ultimate;
        }

        self.cooldown_ticks_remaining = self.cooldown_ticks_remaining.saturating_sub(1);
        if self.cooldown_ticks_remaining == 0 {
            let kind = self.weights.draw(&mut self.rng);
            self.selected_attack = Some(kind);
            let effect = self.execute_attack(kind, player, sinks);
            self.cooldown_ticks_remaining = kind.recovery_ticks();
            self.set_state(ControllerState::Executing(kind));
            return TickEvent::Attack(kind, effect);
        }

        if self.ultimate_ticks_remaining <= self.config.ultimate_windup {
            self.set_state(ControllerState::UltimateWindup);
        } else {
            self.set_state(ControllerState::Cooldown);
        }
        TickEvent::Waiting
    }

    fn is_engaged(&self, player: &PlayerState) -> bool {
        !self.boss.is_defeated()
            && player.position().horizontal_distance(&self.boss.bounds.origin)
                <= self.config.engagement_range
    }

    fn set_state(&mut self, state: ControllerState) {
        if self.state != state {
            debug!("Boss state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn fire_ultimate(&mut self, sinks: &mut WorldSinks) {
        info!("Boss executing ultimate fire blast");
        let spawn = Vec2::new(
            self.boss.bounds.left(),
            self.boss.bounds.center().y - self.config.ultimate_rise,
        );
        sinks.projectiles.push(Projectile::hostile(
            spawn,
            self.config.ultimate_speed,
            ProjectileTag::UltimateFlame,
        ));
    }

    fn execute_attack(
        &mut self,
        kind: AttackKind,
        player: &mut PlayerState,
        sinks: &mut WorldSinks,
    ) -> AttackEffect {
        info!("Boss selected {} | current weights: {}", kind, self.weights);

        match kind {
            AttackKind::Projectile => {
                // Straight at the player's current height
                let spawn = Vec2::new(self.boss.bounds.left(), player.bounds.center().y);
                sinks.projectiles.push(Projectile::hostile(
                    spawn,
                    self.config.projectile_speed,
                    ProjectileTag::Fireball,
                ));
                AttackEffect::ProjectileLaunched
            }
            AttackKind::SpikeDrop => {
                let spawn = Vec2::new(
                    player.bounds.left(),
                    player.bounds.top() - self.config.spike_drop_height,
                );
                sinks
                    .hazards
                    .push(Hazard::spike(spawn, self.config.spike_fall_speed));
                AttackEffect::HazardDropped
            }
            AttackKind::Earthquake => {
                if player.airborne {
                    info!("Player dodged the earthquake");
                    AttackEffect::Dodged
                } else {
                    let damage = self.config.earthquake_damage;
                    player.apply_damage(damage);
                    info!("Player took {} earthquake damage", damage);
                    AttackEffect::Slammed { damage }
                }
            }
        }
    }
}
