//! Settings Models
//!
//! The flat key/value settings written by the options page. Keys are
//! camelCase (`aiProvider`, `openaiApiKey`, ...); unknown keys are ignored and
//! blank strings count as unset.

use serde::{Deserialize, Serialize};

use tagmend_llm::{LlmResult, ProviderConfig, ProviderType};

/// Application settings, read once per operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Selected provider: "openai", "anthropic", "google" or "ollama"
    pub ai_provider: Option<String>,

    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    /// Complete chat-completions URL of an OpenAI-compatible service
    pub openai_endpoint: Option<String>,

    pub anthropic_api_key: Option<String>,
    pub anthropic_model: Option<String>,
    /// Complete Messages API URL
    pub anthropic_endpoint: Option<String>,

    pub google_api_key: Option<String>,
    pub google_model: Option<String>,
    /// API base, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub google_endpoint: Option<String>,

    /// Daemon root, e.g. `http://localhost:11434`
    pub ollama_endpoint: Option<String>,
    pub ollama_model: Option<String>,

    /// Analyze all tags in one request instead of fixed-size batches
    pub deep_analysis: bool,
}

/// `Some(trimmed)` for a non-blank value.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Settings {
    /// The selected provider; `openai` when unset.
    pub fn provider_type(&self) -> LlmResult<ProviderType> {
        match non_blank(&self.ai_provider) {
            Some(name) => name.parse(),
            None => Ok(ProviderType::OpenAI),
        }
    }

    /// Credential, model and endpoint stored for `provider`.
    fn provider_fields(
        &self,
        provider: ProviderType,
    ) -> (Option<String>, Option<String>, Option<String>) {
        match provider {
            ProviderType::OpenAI => (
                non_blank(&self.openai_api_key),
                non_blank(&self.openai_model),
                non_blank(&self.openai_endpoint),
            ),
            ProviderType::Anthropic => (
                non_blank(&self.anthropic_api_key),
                non_blank(&self.anthropic_model),
                non_blank(&self.anthropic_endpoint),
            ),
            ProviderType::Google => (
                non_blank(&self.google_api_key),
                non_blank(&self.google_model),
                non_blank(&self.google_endpoint),
            ),
            ProviderType::Ollama => (
                None,
                non_blank(&self.ollama_model),
                non_blank(&self.ollama_endpoint),
            ),
        }
    }

    /// Build the immutable provider configuration for one operation.
    ///
    /// Fails on an unknown provider or a missing credential, so no request is
    /// ever sent with incomplete settings.
    pub fn provider_config(&self) -> LlmResult<ProviderConfig> {
        let provider = self.provider_type()?;
        let (api_key, model, endpoint) = self.provider_fields(provider);

        if provider.requires_api_key() && api_key.is_none() {
            return Err(tagmend_llm::provider::missing_api_key_error(provider));
        }

        let mut config = ProviderConfig::for_provider(provider);
        config.api_key = api_key;
        config.base_url = endpoint;
        if let Some(model) = model {
            config.model = model;
        }
        Ok(config)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        self.provider_type().map_err(|e| e.to_string())?;
        Ok(())
    }
}
