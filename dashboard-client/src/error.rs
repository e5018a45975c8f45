//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No token and the path requires one
    #[error("Authentication required")]
    Unauthorized,

    /// Server answered 401/403; the session has been cleared
    #[error("Session expired")]
    SessionExpired,

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Transport failure (connection refused, DNS, reset, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx live response
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Domain error raised by an endpoint handler
    #[error("{message}")]
    Api { code: ErrorCode, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Durable storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl ClientError {
    /// Transport-level failure that triggers the live-to-mock failover
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }

    /// Whether the caller should send the user back to the login surface
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::SessionExpired)
    }

    /// Domain error code, if this error carries one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Unauthorized => Some(ErrorCode::NotAuthenticated),
            Self::SessionExpired => Some(ErrorCode::SessionExpired),
            Self::Timeout => Some(ErrorCode::TimeoutError),
            Self::Network(_) => Some(ErrorCode::NetworkError),
            Self::Storage(_) => Some(ErrorCode::StorageError),
            Self::Config(_) => Some(ErrorCode::ConfigError),
            _ => None,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
