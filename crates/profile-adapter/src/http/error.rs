/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, configuration)
[OUTPUT]: Structured error types with context and alert messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the profile adapter
#[derive(Error, Debug)]
pub enum ProfileError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProfileError {
    /// Check if error indicates the service rejected the bearer token
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ProfileError::Authentication { .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ProfileError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    /// Human-readable message suitable for an alert, without the error-kind prefix
    pub fn user_message(&self) -> String {
        match self {
            ProfileError::Api { message, .. } | ProfileError::Authentication { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for profile adapter operations
pub type Result<T> = std::result::Result<T, ProfileError>;
