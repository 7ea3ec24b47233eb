use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedditError>;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("Rate limited by Reddit API")]
    RateLimited,

    #[error("Permission denied (status {status}): {message}")]
    PermissionDenied { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl RedditError {
    /// Classify a non-success HTTP response.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => RedditError::RateLimited,
            401 | 403 => RedditError::PermissionDenied { status, message },
            _ => RedditError::Api { status, message },
        }
    }

    /// Worth one immediate retry: network hiccups and server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            RedditError::Network(_) => true,
            RedditError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RedditError {
    fn from(err: reqwest::Error) -> Self {
        RedditError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for RedditError {
    fn from(err: serde_json::Error) -> Self {
        RedditError::Parse(err.to_string())
    }
}
