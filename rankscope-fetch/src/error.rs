//! Gateway and transport error types.

use thiserror::Error;

// ============================================================================
// Gateway Error
// ============================================================================

/// Error type for provider calls made through the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider answered HTTP 429.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The provider answered HTTP 402.
    #[error("Insufficient credits")]
    InsufficientCredits,

    /// The provider answered with another non-2xx status.
    #[error("Provider error {status}: {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway could not be constructed.
    #[error("Gateway configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Classifies a non-2xx status code.
    pub fn from_status(status: u16, body: &serde_json::Value) -> Self {
        match status {
            429 => Self::RateLimitExceeded,
            402 => Self::InsufficientCredits,
            _ => Self::Provider {
                status,
                body: match body {
                    serde_json::Value::String(text) => text.clone(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                },
            },
        }
    }

    /// Returns true for errors tied to the account's billing state.
    pub fn is_billing(&self) -> bool {
        matches!(self, Self::InsufficientCredits)
    }
}

impl From<HttpError> for GatewayError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection failure reported by a non-reqwest transport.
    #[error("Connection failed: {0}")]
    Connection(String),
}
