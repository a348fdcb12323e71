//! Attack weights and the weighted draw over them

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::BTreeMap;

use crate::tactics::attack::AttackKind;

/// An unvalidated name -> weight mapping, as parsed from an advisory reply
pub type RawTactics = BTreeMap<String, i64>;

/// One weight per [`AttackKind`]; always complete.
///
/// Weights are not range-checked. Non-positive weights are legal values
/// but never win a draw (see [`TacticWeights::draw`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TacticWeights {
    weights: [i64; AttackKind::ALL.len()],
}

impl Default for TacticWeights {
    /// Baseline before any advice arrives: every attack equally likely
    fn default() -> Self {
        Self::new(5, 5, 5)
    }
}

impl TacticWeights {
    pub fn new(projectile: i64, spike_drop: i64, earthquake: i64) -> Self {
        Self {
            weights: [projectile, spike_drop, earthquake],
        }
    }

    pub fn get(&self, kind: AttackKind) -> i64 {
        self.weights[Self::slot(kind)]
    }

    /// Pairs in [`AttackKind::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (AttackKind, i64)> + '_ {
        AttackKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Back to the wire mapping, keyed by exact attack names
    pub fn to_raw(&self) -> RawTactics {
        self.iter()
            .map(|(kind, weight)| (kind.name().to_string(), weight))
            .collect()
    }

    /// Pick an attack with probability proportional to its weight.
    ///
    /// Negative weights count as zero. If no weight is positive the draw
    /// falls back to uniform over all attacks.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> AttackKind {
        // Clamped to u32 range so the u64 total cannot overflow
        let effective = self
            .weights
            .iter()
            .map(|&w| w.clamp(0, u32::MAX as i64) as u64);

        match WeightedIndex::new(effective) {
            Ok(dist) => AttackKind::ALL[dist.sample(rng)],
            Err(_) => AttackKind::ALL[rng.gen_range(0..AttackKind::ALL.len())],
        }
    }

    fn slot(kind: AttackKind) -> usize {
        match kind {
            AttackKind::Projectile => 0,
            AttackKind::SpikeDrop => 1,
            AttackKind::Earthquake => 2,
        }
    }
}

impl std::fmt::Display for TacticWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (kind, weight)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", kind, weight)?;
        }
        write!(f, "}}")
    }
}
