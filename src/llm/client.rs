//! Async HTTP client for the local advisory model
//!
//! Speaks the non-streaming "generate" API of a local model server: one
//! POST carrying a model name and a prompt, one JSON reply whose
//! `response` field holds free-form text. Interpreting that text is the
//! parser's job, not this module's.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::config::AdvisoryConfig;
use crate::core::error::{AdvisoryError, BrainError, Result};

/// Async client for one advisory endpoint
pub struct LlmClient {
    client: Client,
    api_url: String,
    model: String,
}

impl LlmClient {
    /// Create a client from explicit configuration
    ///
    /// The configured timeout bounds every request end to end, so a stalled
    /// server surfaces as [`AdvisoryError::Unreachable`] instead of hanging.
    pub fn new(config: &AdvisoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BrainError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Create a client from environment variables (see [`AdvisoryConfig::from_env`])
    pub fn from_env() -> Result<Self> {
        Self::new(&AdvisoryConfig::from_env())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the model's raw text reply
    pub async fn generate(&self, prompt: &str) -> std::result::Result<String, AdvisoryError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisoryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::Unreachable(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AdvisoryError::Unreachable(e.to_string()))?;

        let completion: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| AdvisoryError::MalformedReply {
                fragment: body.clone(),
                reason: format!("response envelope: {}", e),
            })?;

        Ok(completion.response)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    /// Missing field reads as an empty reply, which then has no JSON in it
    #[serde(default)]
    response: String,
}
