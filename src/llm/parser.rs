//! Turn free-form advisory replies into validated attack weights
//!
//! The model is asked for a bare JSON object but routinely wraps it in
//! commentary. Extraction, parsing and validation are separate stages so
//! each failure keeps its own error kind.

use async_trait::async_trait;
use tracing::info;

use crate::brain::coordinator::TacticsAdvisor;
use crate::core::error::AdvisoryError;
use crate::llm::client::LlmClient;
use crate::llm::context::PlayerPerformanceProfile;
use crate::tactics::validator::validate;
use crate::tactics::weights::{RawTactics, TacticWeights};

/// Asks the advisory model for new weights given a performance profile
pub struct AdvisoryClient {
    client: LlmClient,
}

impl AdvisoryClient {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Full round-trip: prompt, send, extract, parse, validate
    pub async fn request_tactics(
        &self,
        profile: &PlayerPerformanceProfile,
    ) -> Result<TacticWeights, AdvisoryError> {
        let prompt = profile.build_prompt();
        info!(
            model = self.client.model(),
            url = self.client.api_url(),
            "Sending advisory request for profile {}",
            profile.summary()
        );

        let reply = self.client.generate(&prompt).await?;
        interpret_reply(&reply)
    }
}

#[async_trait]
impl TacticsAdvisor for AdvisoryClient {
    async fn request_tactics(
        &self,
        profile: &PlayerPerformanceProfile,
    ) -> Result<TacticWeights, AdvisoryError> {
        AdvisoryClient::request_tactics(self, profile).await
    }
}

/// Extract, parse and validate one raw reply
pub fn interpret_reply(reply: &str) -> Result<TacticWeights, AdvisoryError> {
    let fragment = extract_json(reply)?;
    let candidate = parse_tactics(fragment)?;
    validate(&candidate)
}

/// First `{...}` span in the reply: the first `{` up to the first `}` after it
pub fn extract_json(reply: &str) -> Result<&str, AdvisoryError> {
    let no_json = || AdvisoryError::NoStructuredReply {
        reply: reply.to_string(),
    };

    let start = reply.find('{').ok_or_else(no_json)?;
    let len = reply[start..].find('}').ok_or_else(no_json)?;
    Ok(&reply[start..=start + len])
}

/// Parse a fragment as a flat object of integer weights
pub fn parse_tactics(fragment: &str) -> Result<RawTactics, AdvisoryError> {
    serde_json::from_str(fragment).map_err(|e| AdvisoryError::MalformedReply {
        fragment: fragment.to_string(),
        reason: e.to_string(),
    })
}
