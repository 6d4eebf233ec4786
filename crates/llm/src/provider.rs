//! LLM Provider Trait
//!
//! Defines the common interface for all providers and the factory that picks
//! a binding from a [`ProviderConfig`].

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{CompletionRequest, LlmError, LlmResult, ProviderConfig, ProviderType};
use crate::{AnthropicProvider, GoogleProvider, OllamaProvider, OpenAIProvider};

/// Trait that all providers must implement.
///
/// A binding owns its request/response schema: it builds the provider-specific
/// body, sets the provider-specific auth, makes exactly one HTTP call and
/// extracts the single text payload from the reply envelope. There is no retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Send one prompt and return the model's text reply.
    async fn complete(&self, request: &CompletionRequest) -> LlmResult<String>;
}

/// Build the binding selected by `config.provider`.
pub fn create_provider(config: ProviderConfig) -> Arc<dyn LlmProvider> {
    match config.provider {
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config)),
        ProviderType::Anthropic => Arc::new(AnthropicProvider::new(config)),
        ProviderType::Google => Arc::new(GoogleProvider::new(config)),
        ProviderType::Ollama => Arc::new(OllamaProvider::new(config)),
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: ProviderType) -> LlmError {
    LlmError::Config {
        message: format!(
            "{} API Key not configured. Please check settings.",
            provider.display_name()
        ),
    }
}

/// Return the configured API key or the missing-key error.
pub fn require_api_key(config: &ProviderConfig) -> LlmResult<&str> {
    config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| missing_api_key_error(config.provider))
}

/// Send a prepared JSON POST and return the body of a successful reply.
///
/// Any non-2xx status becomes [`LlmError::Provider`] carrying the raw body.
pub(crate) async fn send_json(
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
    provider: ProviderType,
) -> LlmResult<String> {
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

    let status = response.status();
    let body_text = response.text().await.map_err(|e| LlmError::Network {
        message: e.to_string(),
    })?;

    if !status.is_success() {
        tracing::error!(provider = %provider, status = status.as_u16(), "provider request failed");
        return Err(LlmError::Provider {
            provider: provider.display_name().to_string(),
            status: status.as_u16(),
            body: body_text,
        });
    }

    Ok(body_text)
}

/// Deserialize a provider envelope, mapping failures to `InvalidResponse`.
pub(crate) fn parse_envelope<T: serde::de::DeserializeOwned>(
    body: &str,
    provider: ProviderType,
) -> LlmResult<T> {
    serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse {
        message: format!(
            "Failed to parse {} response: {}",
            provider.display_name(),
            e
        ),
    })
}

/// Error for an envelope that parsed but carried no text.
pub(crate) fn empty_reply_error(provider: ProviderType) -> LlmError {
    LlmError::InvalidResponse {
        message: format!("{} response contained no text", provider.display_name()),
    }
}
