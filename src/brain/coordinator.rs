//! Owns the single in-flight advisory request
//!
//! The simulation thread calls [`BrainCoordinator::request_update`] and
//! returns immediately. The request runs as a task on a tokio runtime; on
//! completion its result is delivered to a [`TacticsSink`] or logged and
//! dropped. The busy flag is the only admission control: while a request
//! is in flight further requests are rejected, not queued.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::brain::inbox::TacticsSink;
use crate::core::error::AdvisoryError;
use crate::llm::context::PlayerPerformanceProfile;
use crate::tactics::weights::TacticWeights;

/// Source of advised weights; the seam between coordination and transport
#[async_trait]
pub trait TacticsAdvisor: Send + Sync {
    async fn request_tactics(
        &self,
        profile: &PlayerPerformanceProfile,
    ) -> Result<TacticWeights, AdvisoryError>;
}

/// How a completed advisory request ended
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisoryOutcome {
    Applied(TacticWeights),
    Failed(AdvisoryError),
}

impl AdvisoryOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AdvisoryOutcome::Applied(_))
    }
}

/// Clears the busy flag when dropped, whether the task finished, failed,
/// panicked, or was cancelled with its runtime.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BrainCoordinator {
    advisor: Arc<dyn TacticsAdvisor>,
    runtime: Handle,
    deadline: Duration,
    busy: Arc<AtomicBool>,
    in_flight: Option<JoinHandle<AdvisoryOutcome>>,
    last_outcome: Arc<Mutex<Option<AdvisoryOutcome>>>,
}

impl BrainCoordinator {
    /// `deadline` bounds each request on top of any transport timeout;
    /// expiry is reported as [`AdvisoryError::Unreachable`].
    pub fn new(advisor: Arc<dyn TacticsAdvisor>, runtime: Handle, deadline: Duration) -> Self {
        Self {
            advisor,
            runtime,
            deadline,
            busy: Arc::new(AtomicBool::new(false)),
            in_flight: None,
            last_outcome: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Outcome of the most recently completed request, if any
    pub fn last_outcome(&self) -> Option<AdvisoryOutcome> {
        self.last_outcome
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Start an advisory request unless one is already in flight.
    ///
    /// Never blocks. Returns `Err(AdvisoryError::Busy)` when the request
    /// was dropped by admission control; every other failure happens
    /// later, inside the task, and is only logged.
    pub fn request_update(
        &mut self,
        profile: PlayerPerformanceProfile,
        sink: Arc<dyn TacticsSink>,
    ) -> Result<(), AdvisoryError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Advisory request dropped: previous request still in flight");
            return Err(AdvisoryError::Busy);
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let advisor = Arc::clone(&self.advisor);
        let last_outcome = Arc::clone(&self.last_outcome);
        let deadline = self.deadline;

        let task = async move {
            let _guard = guard;

            let request = advisor.request_tactics(&profile);
            let result = match tokio::time::timeout(deadline, request).await {
                Ok(result) => result,
                Err(_) => Err(AdvisoryError::Unreachable(format!(
                    "no reply within {:?}",
                    deadline
                ))),
            };

            let outcome = match result {
                Ok(weights) => {
                    info!("New tactics deployed: {}", weights);
                    sink.apply_weights(weights);
                    AdvisoryOutcome::Applied(weights)
                }
                Err(err) => {
                    report_failure(&err);
                    AdvisoryOutcome::Failed(err)
                }
            };

            *last_outcome
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(outcome.clone());
            outcome
        };

        self.in_flight = Some(self.runtime.spawn(task));
        Ok(())
    }

    /// Wait for the in-flight request, if any, and return its outcome
    pub async fn settle(&mut self) -> Option<AdvisoryOutcome> {
        let handle = self.in_flight.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Advisory task aborted: {}", e);
                None
            }
        }
    }
}

fn report_failure(err: &AdvisoryError) {
    match err {
        AdvisoryError::NoStructuredReply { .. } | AdvisoryError::MalformedReply { .. } => {
            warn!(
                kind = err.kind(),
                "Failed to parse advisory reply, keeping current tactics: {}", err
            )
        }
        AdvisoryError::InvalidTactics { .. } => {
            warn!(
                kind = err.kind(),
                "Rejected advised tactics, keeping current tactics: {}", err
            )
        }
        AdvisoryError::Unreachable(_) => {
            warn!(
                kind = err.kind(),
                "Advisory service unreachable, keeping current tactics: {}", err
            )
        }
        AdvisoryError::Busy => debug!(kind = err.kind(), "{}", err),
    }
}
