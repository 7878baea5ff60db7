//! Error types for the GitLab client.

use thiserror::Error;

/// Errors returned by GitLab API calls.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// The configured instance URL could not be parsed.
    #[error("Invalid GitLab URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// No client exists for the current preferences.
    #[error("GitLab client is not configured")]
    NotConfigured,

    /// The request never produced a usable response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401, usually a missing or revoked token.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// HTTP 429.
    #[error("Rate limited by GitLab{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    /// Any other non-success status.
    #[error("GitLab API error ({status}): {message}")]
    Api { status: u16, message: String },
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry in {}s", secs),
        None => String::new(),
    }
}

impl GitLabError {
    /// Classify a non-success HTTP response.
    ///
    /// `body` is the parsed JSON body when there was one. GitLab puts the
    /// reason in `message` for most endpoints and in `error` for OAuth-style
    /// failures.
    pub fn from_status(
        status: u16,
        retry_after: Option<u64>,
        body: Option<&serde_json::Value>,
    ) -> Self {
        let message = body
            .and_then(|b| {
                b.get("message")
                    .or_else(|| b.get("error"))
                    .map(|m| match m.as_str() {
                        Some(s) => s.to_string(),
                        None => m.to_string(),
                    })
            })
            .unwrap_or_else(|| "Unknown error".to_string());

        match status {
            401 => GitLabError::Unauthorized(message),
            429 => GitLabError::RateLimited { retry_after },
            _ => GitLabError::Api { status, message },
        }
    }
}

/// Result type alias for GitLab API operations.
pub type ApiResult<T> = Result<T, GitLabError>;
