//! Provider-facing error type.
//!
//! Unlike the rest of the workspace (which leans on `snafu` for stack-trace
//! carrying error enums), this crate converts heterogeneous provider
//! failures — credential lookup, transport, vendor response shape — into a
//! single flat type. Storing the provider's message as a `String` rather
//! than wrapping its source error keeps this crate's public API stable
//! across whatever transport a given provider adapter happens to use.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HyperError {
    #[error("unknown provider: {0}")]
    ProviderNotFound(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("authentication failed for provider {0}")]
    AuthenticationFailed(String),

    #[error("rate limit exceeded, retry after {retry_after_secs:?}s")]
    RateLimitExceeded { retry_after_secs: Option<u64> },

    #[error("context window exceeded: {0}")]
    ContextWindowExceeded(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("provider returned an error ({code}): {message}")]
    ProviderError { code: String, message: String },

    #[error("failed to parse provider response: {0}")]
    ParseError(String),

    #[error("stream error: {0}")]
    StreamError(String),

    #[error("request was cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl HyperError {
    /// Whether a retry with backoff is worth attempting. Only transient, provider-reported conditions are retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded { .. } | Self::NetworkError(_) | Self::ProviderError { .. }
        )
    }

    /// Suggested delay before a retry, when the provider told us one.
    pub fn retry_delay_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimitExceeded { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }
}

impl From<cocode_config::ConfigError> for HyperError {
    fn from(err: cocode_config::ConfigError) -> Self {
        Self::AuthenticationFailed(err.to_string())
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
