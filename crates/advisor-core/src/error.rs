//! Error Types

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by LLM providers
#[derive(Error, Debug)]
pub enum CoreError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider returned a response we could not parse
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited by the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::ProviderUnavailable(_) | CoreError::RateLimited(_) | CoreError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            CoreError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            CoreError::RateLimited(_) => {
                "You've made too many requests. Please wait a moment.".into()
            }
            CoreError::Auth(_) => "Authentication failed. Please check your API key.".into(),
            CoreError::Parse(_) => "The AI service returned an unreadable response.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        CoreError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(CoreError::RateLimited("slow down".into()).is_retryable());
        assert!(CoreError::ProviderUnavailable("down".into()).is_retryable());
        assert!(!CoreError::Auth("bad key".into()).is_retryable());
    }
}
