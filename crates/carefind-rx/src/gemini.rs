use carefind_core::{AnalysisReport, PrescriptionImage};
use carefind_gemini::{GeminiClient, GenerateContentRequest, GenerationConfig, Part};

use crate::backend::PrescriptionAnalyzer;
use crate::error::ExtractionError;
use crate::schema::{parse_report, response_schema};

const ANALYSIS_PROMPT: &str = "You are reading a photo of a medical prescription. \
Identify every medicine written on it, in the order it appears. For each medicine give \
its name (with strength if written), its purpose, its active ingredients as `contents`, \
the dosage instructions and any important warnings. Then write a short overall summary \
of what the prescription treats. If an entry is illegible, keep it in the list and write \
\"unclear\" for the fields you cannot read instead of omitting it or guessing. If the image \
contains no medicines, return an empty list and say that no medicines were found in the \
summary. Answer with JSON only.";

#[derive(Debug)]
pub struct GeminiAnalyzer {
    client: GeminiClient,
}

impl GeminiAnalyzer {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Image part plus instructions, constrained to the report schema.
    #[must_use]
    pub fn build_request(image: &PrescriptionImage) -> GenerateContentRequest {
        let mut request = GenerateContentRequest::user(vec![
            Part::inline_bytes(&image.mime_type, &image.bytes),
            Part::text(ANALYSIS_PROMPT),
        ]);
        request.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            temperature: Some(0.1),
        });
        request
    }
}

impl PrescriptionAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, image: &PrescriptionImage) -> Result<AnalysisReport, ExtractionError> {
        let request = Self::build_request(image);
        let response = self.client.generate_content(&request).await?;
        let text = response
            .text()
            .ok_or_else(|| ExtractionError::schema("model returned no text"))?;
        let report = parse_report(&text)?;
        tracing::debug!(
            model = self.client.model(),
            medicines = report.medicines.len(),
            "prescription analysis parsed"
        );
        Ok(report)
    }
}
