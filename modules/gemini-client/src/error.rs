use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Rate limited by Gemini API")]
    RateLimited,

    #[error("Content rejected: {0}")]
    InvalidContent(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Classify a non-success HTTP response.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => GeminiError::RateLimited,
            _ => GeminiError::Api { status, message },
        }
    }

    /// Worth one immediate retry: network hiccups and server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            GeminiError::Network(_) => true,
            GeminiError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            GeminiError::from_status(429, String::new()),
            GeminiError::RateLimited
        ));
        assert!(matches!(
            GeminiError::from_status(400, String::new()),
            GeminiError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn transient_covers_network_and_server_errors_only() {
        assert!(GeminiError::Network("reset".into()).is_transient());
        assert!(GeminiError::from_status(502, String::new()).is_transient());
        assert!(!GeminiError::RateLimited.is_transient());
        assert!(!GeminiError::InvalidContent("blocked".into()).is_transient());
        assert!(!GeminiError::from_status(400, String::new()).is_transient());
    }
}
