//! Background advisory coordination
//!
//! Architecture: one coordinator per boss, one request in flight at most.
//! - `TacticsAdvisor` is the async seam to the advisory model
//! - `TacticsInbox` carries accepted weights to the controller
//! - `AdvisoryTrigger` decides when the single request is sent

pub mod coordinator;
pub mod inbox;
pub mod trigger;

pub use coordinator::{AdvisoryOutcome, BrainCoordinator, TacticsAdvisor};
pub use inbox::{TacticsInbox, TacticsSink};
pub use trigger::AdvisoryTrigger;
