//! Response Types
//!
//! Envelope printed by every CLI command.

use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// JSON envelope around one command's result, printed to stdout.
///
/// `success` drives the process exit code. Later commands accept either the
/// envelope or its bare `data` as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, AppError>> for CommandResponse<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: CommandResponse<u32> = Ok(3).into();
        assert!(ok.success);
        assert_eq!(ok.data, Some(3));

        let err: CommandResponse<u32> = Err(AppError::validation("no tags selected")).into();
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("Validation error: no tags selected"));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
    }
}
