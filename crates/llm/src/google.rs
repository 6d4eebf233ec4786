//! Google Gemini Provider
//!
//! Implementation of the LlmProvider trait for the Gemini `generateContent`
//! endpoint. The API key travels as the `key` query parameter.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{empty_reply_error, parse_envelope, require_api_key, send_json, LlmProvider};
use super::types::{CompletionRequest, LlmResult, ProviderConfig, ProviderType};
use crate::http_client::build_http_client;

/// Default Gemini API base
const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
pub struct GoogleProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GoogleProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client();
        Self { config, client }
    }

    /// Get the API base; the endpoint override replaces everything before `/models`.
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(GOOGLE_API_BASE)
    }

    /// Full `generateContent` URL for the configured model (without the key).
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url().trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut generation_config = serde_json::json!({
            "temperature": self.config.temperature,
        });
        if let Some(max_tokens) = self.config.max_output_tokens(request) {
            generation_config["maxOutputTokens"] = serde_json::json!(max_tokens);
        }

        serde_json::json!({
            "contents": [
                { "parts": [ { "text": request.prompt } ] }
            ],
            "generationConfig": generation_config,
        })
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<String> {
        let api_key = require_api_key(&self.config)?;
        let body = self.build_request_body(request);

        tracing::debug!(model = %self.config.model, "sending Gemini request");

        let http_request = self
            .client
            .post(self.generate_url())
            .query(&[("key", api_key)]);
        let body_text = send_json(http_request, &body, ProviderType::Google).await?;

        let response: GeminiResponse = parse_envelope(&body_text, ProviderType::Google)?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| empty_reply_error(ProviderType::Google))
    }
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
