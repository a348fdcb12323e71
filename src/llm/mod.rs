//! Advisory model plumbing: HTTP transport, player profile, reply parsing

pub mod client;
pub mod context;
pub mod parser;

pub use client::LlmClient;
pub use context::{PlayerPerformanceProfile, PlayerTelemetry};
pub use parser::{extract_json, interpret_reply, parse_tactics, AdvisoryClient};
