use carefind_core::ValidationError;
use carefind_gemini::GeminiError;
use thiserror::Error;

/// Errors raised inside the search backends.
///
/// Only [`LocatorError::Validation`] ever reaches callers of
/// [`crate::LocationQueryService::search`]; everything else is logged and
/// turned into a degraded response.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network or TLS failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gemini error: {0}")]
    Gemini(#[from] GeminiError),

    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Nominatim's usage policy requires a descriptive `User-Agent`.
    #[error("a descriptive User-Agent is required for {service}")]
    MissingClientIdentifier { service: &'static str },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
