use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The prompt or the candidate was blocked by safety filters.
    #[error("request blocked by Gemini: {0}")]
    Blocked(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeminiError {
    /// True when the failure happened on the way to or from the API rather
    /// than in what it returned.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, GeminiError::Http(_) | GeminiError::Api { .. })
    }
}
