//! Encounter and advisory configuration with documented constants
//!
//! Tick-denominated values assume the 60 Hz simulation rate. Every field
//! has a default, so a TOML file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::error::{BrainError, Result};

/// Tuning for the boss combat controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === ENGAGEMENT ===
    /// Horizontal distance beyond which the boss stops acting (world units)
    ///
    /// Measured between the player's and the boss's left edges, so the
    /// boss width is not part of the range.
    pub engagement_range: f32,

    /// Boss hit points at encounter start
    pub boss_hp: i32,

    /// Boss bounding box size (world units)
    pub boss_width: f32,
    pub boss_height: f32,

    // === TIMERS ===
    /// Delay before the first regular attack (ticks)
    ///
    /// At 120 the player gets two seconds to settle in.
    pub initial_delay: u32,

    /// Period of the scripted ultimate attack (ticks)
    ///
    /// At 600 the ultimate fires every ten seconds, independent of the
    /// advised weights.
    pub ultimate_period: u32,

    /// Ticks before the ultimate during which the boss is visibly charging
    ///
    /// Must be shorter than `ultimate_period`, otherwise the boss would
    /// never leave the wind-up state.
    pub ultimate_windup: u32,

    // === ATTACK EFFECTS ===
    /// Damage dealt by the earthquake to a grounded player
    pub earthquake_damage: i32,

    /// Horizontal speed of the regular projectile (negative = toward the left)
    pub projectile_speed: f32,

    /// Horizontal speed of the ultimate projectile
    ///
    /// Deliberately slow so the player can read and jump it.
    pub ultimate_speed: f32,

    /// How far above the boss's vertical centre the ultimate spawns
    pub ultimate_rise: f32,

    /// How far above the player a spike hazard spawns
    pub spike_drop_height: f32,

    /// Fall speed of a spike hazard once triggered (units per tick)
    pub spike_fall_speed: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            engagement_range: 900.0,
            boss_hp: 100,
            boss_width: 700.0,
            boss_height: 600.0,

            initial_delay: 120,
            ultimate_period: 600,
            ultimate_windup: 90,

            earthquake_damage: 15,
            projectile_speed: -12.0,
            ultimate_speed: -4.0,
            ultimate_rise: 100.0,
            spike_drop_height: 400.0,
            spike_fall_speed: 12.0,
        }
    }
}

impl CombatConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.engagement_range <= 0.0 {
            return Err(format!(
                "engagement_range ({}) must be positive",
                self.engagement_range
            ));
        }

        if self.initial_delay == 0 || self.ultimate_period == 0 {
            return Err("initial_delay and ultimate_period must be non-zero".into());
        }

        if self.ultimate_windup >= self.ultimate_period {
            return Err(format!(
                "ultimate_windup ({}) should be < ultimate_period ({})",
                self.ultimate_windup, self.ultimate_period
            ));
        }

        Ok(())
    }
}

/// Where and how to reach the advisory model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Generate endpoint of the local model server
    pub api_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Upper bound on a single request, connect through body (seconds)
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:11434/api/generate".into(),
            model: "phi3".into(),
            timeout_secs: 20,
        }
    }
}

impl AdvisoryConfig {
    /// Defaults overridden by environment variables
    ///
    /// Optional: LLM_API_URL, LLM_MODEL, LLM_TIMEOUT_SECS
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply LLM_* environment overrides on top of `self`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("LLM_API_URL") {
            self.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.model = model;
        }
        if let Some(secs) = parse_timeout_override(std::env::var("LLM_TIMEOUT_SECS").ok()) {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A usable LLM_TIMEOUT_SECS value; zero and unparsable input are ignored
fn parse_timeout_override(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok()).filter(|&secs: &u64| secs > 0)
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    pub combat: CombatConfig,
    pub advisory: AdvisoryConfig,
}

impl BrainConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: BrainConfig = toml::from_str(content)?;
        config.combat.validate().map_err(BrainError::Config)?;
        if config.advisory.timeout_secs == 0 {
            return Err(BrainError::Config(
                "advisory timeout_secs must be non-zero".into(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_windup_must_be_shorter_than_period() {
        let config = CombatConfig {
            ultimate_windup: 600,
            ..CombatConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_range_rejected() {
        let config = CombatConfig {
            engagement_range: 0.0,
            ..CombatConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            [combat]
            ultimate_period = 300
            earthquake_damage = 20

            [advisory]
            model = "qwen"
        "#;
        let config = BrainConfig::parse_toml(toml).unwrap();
        assert_eq!(config.combat.ultimate_period, 300);
        assert_eq!(config.combat.earthquake_damage, 20);
        assert_eq!(config.combat.initial_delay, 120);
        assert_eq!(config.advisory.model, "qwen");
        assert_eq!(config.advisory.api_url, AdvisoryConfig::default().api_url);
    }

    #[test]
    fn test_parse_empty_toml_gives_defaults() {
        let config = BrainConfig::parse_toml("").unwrap();
        assert_eq!(config, BrainConfig::default());
    }

    #[test]
    fn test_parse_rejects_inconsistent_combat() {
        let toml = r#"
            [combat]
            ultimate_period = 50
            ultimate_windup = 90
        "#;
        let result = BrainConfig::parse_toml(toml);
        assert!(matches!(result, Err(BrainError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_zero_timeout() {
        let result = BrainConfig::parse_toml("[advisory]\ntimeout_secs = 0\n");
        assert!(matches!(result, Err(BrainError::Config(_))));
    }

    #[test]
    fn test_timeout_override_ignores_zero() {
        assert_eq!(parse_timeout_override(Some("0".into())), None);
        assert_eq!(parse_timeout_override(Some("abc".into())), None);
        assert_eq!(parse_timeout_override(None), None);
        assert_eq!(parse_timeout_override(Some("35".into())), Some(35));
    }

    #[test]
    fn test_timeout_duration() {
        let config = AdvisoryConfig {
            timeout_secs: 7,
            ..AdvisoryConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(7));
    }
}
