//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.
//!
//! Every variant aborts the whole analysis: no operation returns a partial
//! result alongside an error.

use thiserror::Error;

use tagmend_core::CoreError;
use tagmend_llm::LlmError;
use tagmend_recovery::RecoveryError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider errors: missing credential, unknown provider, HTTP failure
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// A cleaned model reply was not the JSON shape the operation expects
    #[error("Failed to parse AI response ({operation}, batch {batch}): {message}")]
    Parse {
        operation: &'static str,
        batch: usize,
        message: String,
    },

    /// A similarity reply failed to parse and nothing could be salvaged
    #[error("Failed to parse AI response (batch {batch}): {source} (parse error: {parse_message})")]
    RecoveryFailed {
        batch: usize,
        #[source]
        source: RecoveryError,
        parse_message: String,
    },

    /// Mail store errors
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error for one batch of an operation
    pub fn parse(operation: &'static str, batch: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            operation,
            batch,
            message: msg.into(),
        }
    }
}

/// Convert AppError to a string suitable for CLI output
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
