use std::future::Future;
use std::time::Duration;

use carefind_core::{AnalysisBackendKind, AnalysisReport, AppConfig, PrescriptionImage};
use carefind_gemini::GeminiClient;

use crate::error::ExtractionError;
use crate::gemini::GeminiAnalyzer;
use crate::mock::MockAnalyzer;

/// One way of turning a prescription photo into a report.
pub trait PrescriptionAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// The image has already been validated by the caller.
    fn analyze(
        &self,
        image: &PrescriptionImage,
    ) -> impl Future<Output = Result<AnalysisReport, ExtractionError>> + Send;
}

#[derive(Debug)]
pub enum AnalysisBackend {
    Mock(MockAnalyzer),
    Gemini(GeminiAnalyzer),
}

impl AnalysisBackend {
    /// # Errors
    ///
    /// Returns [`ExtractionError::MissingCredential`] when Gemini is selected
    /// without a key, or [`ExtractionError::Transport`] if the client cannot
    /// be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractionError> {
        match config.analysis_backend {
            AnalysisBackendKind::Mock => Ok(Self::Mock(
                MockAnalyzer::new().with_latency(Duration::from_millis(config.mock_latency_ms)),
            )),
            AnalysisBackendKind::Gemini => {
                let key = config.gemini_api_key.as_deref().ok_or_else(|| {
                    ExtractionError::MissingCredential("GEMINI_API_KEY".to_string())
                })?;
                let client = GeminiClient::with_base_url(
                    key,
                    &config.gemini_model,
                    config.request_timeout_secs,
                    &config.gemini_base_url,
                )?;
                Ok(Self::Gemini(GeminiAnalyzer::new(client)))
            }
        }
    }
}

impl PrescriptionAnalyzer for AnalysisBackend {
    fn name(&self) -> &'static str {
        match self {
            AnalysisBackend::Mock(b) => b.name(),
            AnalysisBackend::Gemini(b) => b.name(),
        }
    }

    async fn analyze(&self, image: &PrescriptionImage) -> Result<AnalysisReport, ExtractionError> {
        match self {
            AnalysisBackend::Mock(b) => b.analyze(image).await,
            AnalysisBackend::Gemini(b) => b.analyze(image).await,
        }
    }
}
