//! LLM Types
//!
//! Core types for provider interactions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Google,
    Ollama,
}

impl ProviderType {
    /// Every supported provider, in settings-form order.
    pub const ALL: [ProviderType; 4] = [
        ProviderType::OpenAI,
        ProviderType::Anthropic,
        ProviderType::Google,
        ProviderType::Ollama,
    ];

    /// Model used when the settings do not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "gpt-4o-mini",
            ProviderType::Anthropic => "claude-3-5-sonnet-20241022",
            ProviderType::Google => "gemini-2.0-flash",
            ProviderType::Ollama => "llama3.2",
        }
    }

    /// Output-token ceiling used for deep analysis.
    ///
    /// `None` for Ollama: the daemon request carries no token ceiling at all.
    pub fn deep_max_tokens(&self) -> Option<u32> {
        match self {
            ProviderType::OpenAI | ProviderType::Anthropic => Some(16_384),
            ProviderType::Google => Some(8_192),
            ProviderType::Ollama => None,
        }
    }

    /// Whether a credential must be configured before calling this provider.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderType::Ollama)
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "OpenAI",
            ProviderType::Anthropic => "Anthropic",
            ProviderType::Google => "Google AI",
            ProviderType::Ollama => "Ollama",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Google => write!(f, "google"),
            ProviderType::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderType::OpenAI),
            "anthropic" => Ok(ProviderType::Anthropic),
            "google" => Ok(ProviderType::Google),
            "ollama" => Ok(ProviderType::Ollama),
            _ => Err(LlmError::UnknownProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Which output-token ceiling a request runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputBudget {
    /// The configured `max_tokens`
    #[default]
    Standard,
    /// The provider maximum from [`ProviderType::deep_max_tokens`]
    Deep,
}

/// A single prompt to complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    #[serde(default)]
    pub budget: OutputBudget,
    /// Fixed ceiling that wins over the budget (used by the connection test).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_tokens_override: Option<u32>,
    /// Ask providers that support it for a JSON-only reply.
    #[serde(default = "default_expect_json")]
    pub expect_json: bool,
}

fn default_expect_json() -> bool {
    true
}

impl CompletionRequest {
    /// A JSON-producing request under the standard ceiling.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            budget: OutputBudget::Standard,
            max_tokens_override: None,
            expect_json: true,
        }
    }

    /// A JSON-producing request under the deep-analysis ceiling.
    pub fn deep(prompt: impl Into<String>) -> Self {
        Self {
            budget: OutputBudget::Deep,
            ..Self::new(prompt)
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens_override = Some(max_tokens);
        self
    }

    /// Free-text reply; no JSON response format is requested.
    pub fn plain_text(mut self) -> Self {
        self.expect_json = false;
        self
    }
}

/// Configuration for a provider, built once per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The provider type
    pub provider: ProviderType,
    /// API key (not needed for Ollama)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Output ceiling for standard requests
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    8000
}

fn default_temperature() -> f32 {
    0.3
}

impl ProviderConfig {
    /// Config for `provider` with its default model and no credentials.
    pub fn for_provider(provider: ProviderType) -> Self {
        Self {
            provider,
            api_key: None,
            base_url: None,
            model: provider.default_model().to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }

    /// Output-token ceiling to send with `request`, or `None` to send none.
    pub fn max_output_tokens(&self, request: &CompletionRequest) -> Option<u32> {
        if self.provider == ProviderType::Ollama {
            return None;
        }
        if let Some(max_tokens) = request.max_tokens_override {
            return Some(max_tokens);
        }
        match request.budget {
            OutputBudget::Standard => Some(self.max_tokens),
            OutputBudget::Deep => self.provider.deep_max_tokens(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::for_provider(ProviderType::OpenAI)
    }
}

/// Error types for provider operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// A required setting (usually the API key) is missing or unusable
    Config { message: String },
    /// The configured provider identifier is not recognized
    UnknownProvider { provider: String },
    /// The provider answered with a non-success HTTP status
    Provider {
        provider: String,
        status: u16,
        body: String,
    },
    /// Network/connection error
    Network { message: String },
    /// The response envelope did not contain the expected text payload
    InvalidResponse { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            LlmError::UnknownProvider { provider } => {
                write!(f, "Unknown AI provider: {}", provider)
            }
            LlmError::Provider {
                provider,
                status,
                body,
            } => {
                write!(f, "{} API Error: {} - {}", provider, status, body)
            }
            LlmError::Network { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    /// HTTP status carried by a provider error.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for provider operations
pub type LlmResult<T> = Result<T, LlmError>;
