use carefind_core::{validate_image, AnalysisReport, AppConfig, PrescriptionImage};

use crate::backend::{AnalysisBackend, PrescriptionAnalyzer};
use crate::error::ExtractionError;

/// Validates uploads and runs them through the configured analyzer.
#[derive(Debug)]
pub struct DocumentExtractionService<A: PrescriptionAnalyzer = AnalysisBackend> {
    analyzer: A,
    max_image_bytes: usize,
}

impl DocumentExtractionService<AnalysisBackend> {
    /// # Errors
    ///
    /// See [`AnalysisBackend::from_config`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractionError> {
        let analyzer = AnalysisBackend::from_config(config)?;
        tracing::info!(
            backend = analyzer.name(),
            max_image_bytes = config.max_image_bytes,
            "analysis backend ready"
        );
        Ok(Self::new(analyzer, config.max_image_bytes))
    }
}

impl<A: PrescriptionAnalyzer> DocumentExtractionService<A> {
    pub fn new(analyzer: A, max_image_bytes: usize) -> Self {
        Self {
            analyzer,
            max_image_bytes,
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Analyze one prescription photo. No retry is attempted.
    ///
    /// # Errors
    ///
    /// - [`ExtractionError::Validation`] for an empty, non-image, or oversized
    ///   upload; the analyzer is not called.
    /// - [`ExtractionError::Transport`] or [`ExtractionError::Schema`] from
    ///   the analyzer.
    pub async fn analyze(
        &self,
        image: &PrescriptionImage,
    ) -> Result<AnalysisReport, ExtractionError> {
        validate_image(image, self.max_image_bytes)?;

        match self.analyzer.analyze(image).await {
            Ok(report) => {
                tracing::info!(
                    backend = self.analyzer.name(),
                    medicines = report.medicines.len(),
                    "prescription analyzed"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.analyzer.name(),
                    error = %e,
                    "prescription analysis failed"
                );
                Err(e)
            }
        }
    }
}
