//! OpenAI Provider
//!
//! Implementation of the LlmProvider trait for OpenAI's chat completions API
//! and any endpoint that speaks the same wire format.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{empty_reply_error, parse_envelope, require_api_key, send_json, LlmProvider};
use super::types::{CompletionRequest, LlmResult, ProviderConfig, ProviderType};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// System message sent with every JSON-producing request
const JSON_SYSTEM_PROMPT: &str =
    "You are a tag management assistant. Always answer with valid JSON only.";

/// OpenAI provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
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
            .unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = Vec::new();
        if request.expect_json {
            messages.push(serde_json::json!({
                "role": "system",
                "content": JSON_SYSTEM_PROMPT
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": request.prompt
        }));

        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
        });

        if request.expect_json {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        if let Some(max_tokens) = self.config.max_output_tokens(request) {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<String> {
        let api_key = require_api_key(&self.config)?;
        let body = self.build_request_body(request);

        tracing::debug!(model = %self.config.model, url = %self.base_url(), "sending OpenAI request");

        let http_request = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key));
        let body_text = send_json(http_request, &body, ProviderType::OpenAI).await?;

        let response: OpenAIResponse = parse_envelope(&body_text, ProviderType::OpenAI)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| empty_reply_error(ProviderType::OpenAI))
    }
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
