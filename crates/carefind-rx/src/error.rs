use carefind_core::ValidationError;
use carefind_gemini::GeminiError;
use thiserror::Error;

/// Shown to users for any failure that is not their input's fault.
pub const RETRY_MESSAGE: &str =
    "We could not read this prescription. Please retry with a clearer image.";

/// Everything that can stop an analysis from producing a report.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure, timeout, non-2xx, or a blocked request at the model
    /// endpoint.
    #[error("analysis transport error: {0}")]
    Transport(GeminiError),

    /// The model answered but the answer is not a usable report.
    #[error("analysis response failed schema validation: {reason}")]
    Schema { reason: String },

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

/// An unreadable response envelope is a bad answer, not a transport fault.
impl From<GeminiError> for ExtractionError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Deserialize { context, source } => Self::Schema {
                reason: format!("unreadable response envelope for {context}: {source}"),
            },
            other => Self::Transport(other),
        }
    }
}

impl ExtractionError {
    pub(crate) fn schema(reason: impl Into<String>) -> Self {
        Self::Schema {
            reason: reason.into(),
        }
    }

    /// Message safe to show an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Transport(_) | Self::Schema { .. } | Self::MissingCredential(_) => {
                RETRY_MESSAGE.to_string()
            }
        }
    }
}
