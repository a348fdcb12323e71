pub mod config;
pub mod error;
pub mod types;

pub use config::{AdvisoryConfig, BrainConfig, CombatConfig};
pub use error::{AdvisoryError, BrainError, Result};
