//! What the controller reads from and writes into the surrounding game
//!
//! The game loop owns these values; the controller only borrows them for
//! the duration of a tick.

use serde::{Deserialize, Serialize};

use crate::core::types::{Rect, Vec2};

/// Player body as seen by the boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub bounds: Rect,
    /// True while the player is mid-jump; earthquakes miss airborne players
    pub airborne: bool,
    pub hp: i32,
}

impl PlayerState {
    pub const WIDTH: f32 = 50.0;
    pub const HEIGHT: f32 = 60.0;
    pub const MAX_HP: i32 = 100;

    /// Grounded player at full health with its top-left corner at (x, y)
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
            airborne: false,
            hp: Self::MAX_HP,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.bounds.origin
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Visual kind of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileTag {
    Fireball,
    UltimateFlame,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    /// False for everything the boss spawns
    pub from_player: bool,
    pub tag: ProjectileTag,
}

impl Projectile {
    /// Hostile projectile travelling horizontally at `speed`
    pub fn hostile(position: Vec2, speed: f32, tag: ProjectileTag) -> Self {
        Self {
            position,
            velocity: Vec2::new(speed, 0.0),
            from_player: false,
            tag,
        }
    }
}

/// Spike that hangs until the player walks under it, then falls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub position: Vec2,
    pub falling: bool,
    pub fall_speed: f32,
}

impl Hazard {
    pub const WIDTH: f32 = 30.0;
    pub const HEIGHT: f32 = 80.0;

    pub fn spike(position: Vec2, fall_speed: f32) -> Self {
        Self {
            position,
            falling: false,
            fall_speed,
        }
    }
}

/// Collections the controller appends spawned effects into
#[derive(Debug, Clone, Default)]
pub struct WorldSinks {
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
}

impl WorldSinks {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_defaults() {
        let player = PlayerState::new(100.0, 200.0);
        assert!(!player.airborne);
        assert_eq!(player.hp, 100);
        assert_eq!(player.bounds.center(), Vec2::new(125.0, 230.0));
    }

    #[test]
    fn test_player_damage() {
        let mut player = PlayerState::new(0.0, 0.0);
        player.apply_damage(60);
        assert!(player.is_alive());
        player.apply_damage(40);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_hostile_projectile() {
        let p = Projectile::hostile(Vec2::new(10.0, 20.0), -12.0, ProjectileTag::Fireball);
        assert!(!p.from_player);
        assert_eq!(p.velocity, Vec2::new(-12.0, 0.0));
        assert_eq!(p.tag, ProjectileTag::Fireball);
    }
}
