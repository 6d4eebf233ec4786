//! tagmend LLM
//!
//! Provides a unified interface for sending a single prompt to one of the
//! supported chat/completion providers and getting the text reply back:
//! - OpenAI (and OpenAI-compatible endpoints)
//! - Anthropic Claude
//! - Google Gemini
//! - Ollama (local inference daemon)
//!
//! Also includes the HTTP client factory and the provider factory that turns a
//! [`ProviderConfig`] into a boxed [`LlmProvider`].

pub mod anthropic;
pub mod google;
pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use http_client::build_http_client;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{create_provider, LlmProvider};
pub use types::*;
