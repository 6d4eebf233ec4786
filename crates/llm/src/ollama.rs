//! Ollama Provider
//!
//! Implementation of the LlmProvider trait for a local Ollama daemon via its
//! non-streaming `/api/generate` endpoint. No API key, no output ceiling.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{parse_envelope, send_json, LlmProvider};
use super::types::{CompletionRequest, LlmError, LlmResult, ProviderConfig, ProviderType};
use crate::http_client::build_http_client;

/// Default Ollama daemon address
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Completion path on the daemon
const GENERATE_PATH: &str = "/api/generate";

/// Ollama provider for local inference
pub struct OllamaProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client();
        Self { config, client }
    }

    /// Get the base URL for the Ollama daemon
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(OLLAMA_DEFAULT_URL)
    }

    /// Resolve the generate endpoint.
    ///
    /// A bare daemon root gets `/api/generate`; an endpoint that already
    /// names a path is used as is.
    fn generate_url(&self) -> LlmResult<url::Url> {
        let base = self.base_url().trim_end_matches('/');
        let mut url = url::Url::parse(base).map_err(|e| LlmError::Config {
            message: format!("Invalid Ollama endpoint '{}': {}", base, e),
        })?;

        if url.path().is_empty() || url.path() == "/" {
            url.set_path(GENERATE_PATH);
        }
        Ok(url)
    }

    /// Build the request body for the daemon
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": self.config.temperature
            }
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<String> {
        let url = self.generate_url()?;
        let body = self.build_request_body(request);

        tracing::debug!(model = %self.config.model, url = %url, "sending Ollama request");

        let body_text = send_json(self.client.post(url), &body, ProviderType::Ollama)
            .await
            .map_err(|e| match e {
                LlmError::Network { message } => LlmError::Network {
                    message: format!("Cannot connect to Ollama at {}: {}", self.base_url(), message),
                },
                other => other,
            })?;

        let response: OllamaResponse = parse_envelope(&body_text, ProviderType::Ollama)?;
        Ok(response.response)
    }
}

/// Ollama generate response format
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}
