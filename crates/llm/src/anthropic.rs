//! Anthropic Claude Provider
//!
//! Implementation of the LlmProvider trait for Anthropic's Messages API.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{empty_reply_error, parse_envelope, require_api_key, send_json, LlmProvider};
use super::types::{CompletionRequest, LlmResult, ProviderConfig, ProviderType};
use crate::http_client::build_http_client;

/// Default Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Current API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client();
        Self { config, client }
    }

    /// Get the API URL; the endpoint override is a complete URL.
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(ANTHROPIC_API_URL)
    }

    /// Build the request body for the API.
    ///
    /// `max_tokens` is mandatory in the Messages API, so it is always sent.
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let max_tokens = self
            .config
            .max_output_tokens(request)
            .unwrap_or(self.config.max_tokens);

        serde_json::json!({
            "model": self.config.model,
            "max_tokens": max_tokens,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<String> {
        let api_key = require_api_key(&self.config)?;
        let body = self.build_request_body(request);

        tracing::debug!(model = %self.config.model, "sending Anthropic request");

        let http_request = self
            .client
            .post(self.base_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let body_text = send_json(http_request, &body, ProviderType::Anthropic).await?;

        let response: AnthropicResponse = parse_envelope(&body_text, ProviderType::Anthropic)?;
        response
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| empty_reply_error(ProviderType::Anthropic))
    }
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
