//! Boss combat: the attack state machine and the world it acts on

pub mod controller;
pub mod world;

pub use controller::{
    AttackEffect, BossBody, BossSnapshot, CombatController, ControllerState, TickEvent,
};
pub use world::{Hazard, PlayerState, Projectile, ProjectileTag, WorldSinks};
