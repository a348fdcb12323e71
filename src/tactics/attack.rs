//! The closed set of regular boss attacks

use serde::{Deserialize, Serialize};

/// A regular attack the boss can choose by weighted draw.
///
/// Adding a variant here also adds it to the advisory whitelist, since
/// validation checks against [`AttackKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackKind {
    /// Fast fireball aimed at the player's height
    Projectile,
    /// Spike hazard dropped from above the player
    SpikeDrop,
    /// Ground slam that only hurts a grounded player
    Earthquake,
}

impl AttackKind {
    pub const ALL: [AttackKind; 3] = [
        AttackKind::Projectile,
        AttackKind::SpikeDrop,
        AttackKind::Earthquake,
    ];

    /// Exact-case name used on the advisory wire
    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::Projectile => "Projectile",
            AttackKind::SpikeDrop => "SpikeDrop",
            AttackKind::Earthquake => "Earthquake",
        }
    }

    /// Exact-case lookup; anything else is not a recognised attack
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Recovery time after this attack before the next regular attack (ticks)
    pub fn recovery_ticks(&self) -> u32 {
        match self {
            AttackKind::Projectile => 60,  // 1s
            AttackKind::SpikeDrop => 90,   // 1.5s
            AttackKind::Earthquake => 150, // 2.5s, heavy recovery
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in AttackKind::ALL {
            assert_eq!(AttackKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name_is_case_exact() {
        assert_eq!(AttackKind::from_name("projectile"), None);
        assert_eq!(AttackKind::from_name("spike_drop"), None);
        assert_eq!(AttackKind::from_name("EARTHQUAKE"), None);
        assert_eq!(AttackKind::from_name("Projectile "), None);
    }

    #[test]
    fn test_recovery_ordering() {
        // Ranged < area denial < heavy ground attack
        assert!(AttackKind::Projectile.recovery_ticks() < AttackKind::SpikeDrop.recovery_ticks());
        assert!(AttackKind::SpikeDrop.recovery_ticks() < AttackKind::Earthquake.recovery_ticks());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&AttackKind::SpikeDrop).unwrap();
        assert_eq!(json, "\"SpikeDrop\"");
    }
}
