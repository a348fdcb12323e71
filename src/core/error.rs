use thiserror::Error;

use crate::tactics::weights::RawTactics;

/// Ways an advisory round-trip can fail to produce new weights.
///
/// None of these are fatal: the coordinator logs them and the controller
/// keeps its last-known-good weights.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    #[error("no JSON object found in advisory reply: {reply:?}")]
    NoStructuredReply { reply: String },

    #[error("malformed advisory reply {fragment:?}: {reason}")]
    MalformedReply { fragment: String, reason: String },

    #[error("rejected tactics with unexpected attack names: {payload:?}")]
    InvalidTactics { payload: RawTactics },

    #[error("advisory service unreachable: {0}")]
    Unreachable(String),

    #[error("advisory request already in flight")]
    Busy,
}

impl AdvisoryError {
    /// Short label for log lines and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisoryError::NoStructuredReply { .. } => "no_structured_reply",
            AdvisoryError::MalformedReply { .. } => "malformed_reply",
            AdvisoryError::InvalidTactics { .. } => "invalid_tactics",
            AdvisoryError::Unreachable(_) => "unreachable",
            AdvisoryError::Busy => "busy",
        }
    }
}

#[derive(Error, Debug)]
pub enum BrainError {
    #[error("Advisory error: {0}")]
    Advisory(#[from] AdvisoryError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BrainError>;
