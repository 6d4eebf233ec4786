//! Core Error Types
//!
//! Defines the foundational error types used across the tagmend workspace.
//! These error types are dependency-free (only thiserror + std) so that mail
//! store implementations can depend on this crate without pulling in HTTP.
//!
//! The root crate extends these with analysis-specific variants (parse and
//! recovery failures, provider errors).

use thiserror::Error;

/// Core error type for the tagmend workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A merge pair the store refuses to apply
    #[error("Validation error: {0}")]
    Validation(String),

    /// A tag name or key the store does not know
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
