//! Error handling for the gateway
//!
//! One error type covers the whole crate; HTTP status mapping lives in
//! `server::routes::errors`.

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client input errors (missing field, malformed multipart)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Inbound body exceeded the configured size cap
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upstream service rejected the request or failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Credential resolution or token exchange failures
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Upstream call exceeded the configured timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The message to surface in an HTTP error body.
    ///
    /// String variants carry a caller-facing message already; structured
    /// variants fall back to their Display form.
    pub fn public_message(&self) -> String {
        match self {
            Self::Config(m)
            | Self::Validation(m)
            | Self::PayloadTooLarge(m)
            | Self::Upstream(m)
            | Self::Auth(m)
            | Self::Timeout(m)
            | Self::Internal(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
