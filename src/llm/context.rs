//! Player telemetry and the performance profile sent to the advisory model
//!
//! Telemetry is counted live by the game loop; the profile is a frozen
//! snapshot taken once, when the advisory trigger fires.

use serde::{Deserialize, Serialize};

use crate::tactics::attack::AttackKind;

/// Running counters the game loop bumps as the player acts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTelemetry {
    pub total_jumps: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
}

impl PlayerTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_jump(&mut self) {
        self.total_jumps += 1;
    }

    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    pub fn record_hit(&mut self) {
        self.shots_hit += 1;
    }

    /// Freeze the current counters into a profile
    pub fn profile(&self) -> PlayerPerformanceProfile {
        PlayerPerformanceProfile {
            jumps: self.total_jumps,
            accuracy_percent: accuracy_percent(self.shots_hit, self.shots_fired),
        }
    }
}

/// Hits over shots as a percentage rounded to two decimals; 0 with no shots
///
/// Hits beyond the shot count are clamped so the result stays within 0..=100.
fn accuracy_percent(hits: u32, fired: u32) -> f64 {
    if fired == 0 {
        return 0.0;
    }
    let raw = hits.min(fired) as f64 / fired as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Read-only snapshot of how the player has been playing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPerformanceProfile {
    pub jumps: u32,
    pub accuracy_percent: f64,
}

impl PlayerPerformanceProfile {
    /// One-line description embedded in the prompt
    pub fn summary(&self) -> String {
        format!(
            "jumps: {}, accuracy_percent: {}",
            self.jumps, self.accuracy_percent
        )
    }

    /// Instruction asking the model for a flat name -> weight object
    pub fn build_prompt(&self) -> String {
        let names: Vec<String> = AttackKind::ALL
            .iter()
            .map(|kind| format!("\"{}\"", kind.name()))
            .collect();

        format!(
            "You are the tactical brain of a boss in an action game.\n\
             Player data: {summary}.\n\
             Output ONLY a JSON object assigning tactical weights (1-10) to these attacks:\n\
             {names}.\n\
             Use exactly these names as keys and integers as values.\n\
             Example: {{\"Projectile\": 8, \"SpikeDrop\": 2, \"Earthquake\": 4}}",
            summary = self.summary(),
            names = names.join(", "),
        )
    }
}
