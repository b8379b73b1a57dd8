//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  {"cmd":"add_to_cart","args":{...}}                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  dispatch()                                                      │  │
//! │  │         │                                                        │  │
//! │  │  Unknown cmd? ───────── ApiError(INVALID_COMMAND) ──────────────►│  │
//! │  │         │                                                        │  │
//! │  │  Bad args? ──────────── ApiError(INVALID_ARGUMENTS) ────────────►│  │
//! │  │         │                                                        │  │
//! │  │  Validation Error? ──── CoreError::Validation ── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Storage failures never get here: CartStore logs and swallows them.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_core::CoreError;
use ts_rs::TS;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity must be positive"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Input failed a cart rule (400)
    ValidationError,

    /// Command name not recognised
    InvalidCommand,

    /// Command arguments missing or malformed
    InvalidArguments,

    /// Request line is not JSON
    InvalidRequest,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unknown_command(cmd: &str) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, format!("Unknown command: {}", cmd))
    }

    /// Creates an argument error for `cmd`.
    pub fn arguments(cmd: &str, err: serde_json::Error) -> Self {
        ApiError::new(
            ErrorCode::InvalidArguments,
            format!("Invalid arguments for {}: {}", cmd, err),
        )
    }

    pub fn invalid_request(err: serde_json::Error) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, format!("Invalid request: {}", err))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::UnknownLocale(tag) => ApiError::new(
                ErrorCode::InvalidArguments,
                format!("Unsupported locale: {}", tag),
            ),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
