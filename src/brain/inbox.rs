//! Hand-off of advised weights from the advisory task to the controller

use std::sync::{Arc, Mutex};

use crate::tactics::weights::{RawTactics, TacticWeights};

/// Receiver of advised weights.
///
/// Called from the advisory task, never from the simulation thread.
pub trait TacticsSink: Send + Sync {
    fn apply_weights(&self, weights: TacticWeights);
}

/// Single-slot mailbox shared between the advisory task and the controller.
///
/// The writer replaces the slot whole and the controller takes it whole on
/// its next tick, so a half-written mapping is never observable. A newer
/// delivery overwrites one that has not been picked up yet.
#[derive(Debug, Clone, Default)]
pub struct TacticsInbox {
    slot: Arc<Mutex<Option<RawTactics>>>,
}

impl TacticsInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, candidate: RawTactics) {
        *self.lock() = Some(candidate);
    }

    pub fn take(&self) -> Option<RawTactics> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<RawTactics>> {
        // A panic while holding the lock cannot leave an Option half-written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TacticsSink for TacticsInbox {
    fn apply_weights(&self, weights: TacticWeights) {
        self.post(weights.to_raw());
    }
}
