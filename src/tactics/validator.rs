//! Key-set validation for advised weights

use crate::core::error::AdvisoryError;
use crate::tactics::attack::AttackKind;
use crate::tactics::weights::{RawTactics, TacticWeights};

/// Accept `candidate` only if its keys are exactly the recognised attack names.
///
/// Extra, missing, or misspelled keys fail closed and the rejected mapping
/// is returned inside the error. Values are not range-checked.
pub fn validate(candidate: &RawTactics) -> Result<TacticWeights, AdvisoryError> {
    let reject = || AdvisoryError::InvalidTactics {
        payload: candidate.clone(),
    };

    if candidate.len() != AttackKind::ALL.len() {
        return Err(reject());
    }

    let weight = |kind: AttackKind| candidate.get(kind.name()).copied().ok_or_else(reject);

    Ok(TacticWeights::new(
        weight(AttackKind::Projectile)?,
        weight(AttackKind::SpikeDrop)?,
        weight(AttackKind::Earthquake)?,
    ))
}
