//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one tick = one frame at 60 Hz)
pub type Tick = u64;

/// Simulation rate the tick-denominated constants are tuned for
pub const TICKS_PER_SECOND: u32 = 60;

/// 2D position or velocity in world units (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Absolute distance along the x axis only
    pub fn horizontal_distance(&self, other: &Self) -> f32 {
        (self.x - other.x).abs()
    }
}

/// Axis-aligned box: `origin` is the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}
