//! Pre-authored reports for running without a model.

use std::sync::Arc;
use std::time::Duration;

use carefind_core::{AnalysisReport, MedicineEntry, PrescriptionImage, RotationCursor};

use crate::backend::PrescriptionAnalyzer;
use crate::error::ExtractionError;

struct CannedMedicine {
    name: &'static str,
    purpose: &'static str,
    contents: &'static str,
    dosage: &'static str,
    warnings: &'static str,
}

struct CannedReport {
    keywords: &'static [&'static str],
    medicines: &'static [CannedMedicine],
    summary: &'static str,
}

const POOL: &[CannedReport] = &[
    CannedReport {
        keywords: &["infection", "antibiotic", "fever", "pain"],
        medicines: &[
            CannedMedicine {
                name: "Amoxicillin 500mg",
                purpose: "Treats bacterial infections",
                contents: "Amoxicillin",
                dosage: "Take one capsule three times a day for 7 days with food.",
                warnings: "May cause nausea, diarrhea. Complete the full course even if you feel better.",
            },
            CannedMedicine {
                name: "Paracetamol 650mg",
                purpose: "Pain relief and fever reduction",
                contents: "Paracetamol",
                dosage: "Take one tablet as needed for pain or fever, not more than 3 tablets in 24 hours.",
                warnings: "Do not exceed recommended dose. Avoid alcohol.",
            },
        ],
        summary: "This prescription is for a bacterial infection and includes medication for \
                  associated pain/fever. It's crucial to complete the antibiotic course as instructed.",
    },
    CannedReport {
        keywords: &["acid", "reflux", "stomach", "gastr", "allerg"],
        medicines: &[
            CannedMedicine {
                name: "Omeprazole 20mg",
                purpose: "Reduces stomach acid",
                contents: "Omeprazole",
                dosage: "Take one capsule once daily, 30 minutes before breakfast.",
                warnings: "May cause headache, nausea. Long-term use should be monitored by a doctor.",
            },
            CannedMedicine {
                name: "Loratadine 10mg",
                purpose: "Relieves allergy symptoms",
                contents: "Loratadine",
                dosage: "Take one tablet once daily.",
                warnings: "May cause drowsiness. Do not drive or operate machinery if affected.",
            },
        ],
        summary: "This prescription addresses acid reflux and allergy symptoms. Follow dosage \
                  carefully for optimal relief.",
    },
];

impl CannedReport {
    fn to_report(&self) -> AnalysisReport {
        AnalysisReport {
            medicines: self
                .medicines
                .iter()
                .map(|m| MedicineEntry {
                    name: m.name.to_string(),
                    purpose: m.purpose.to_string(),
                    active_ingredients: m.contents.to_string(),
                    dosage_instructions: Some(m.dosage.to_string()),
                    warnings: Some(m.warnings.to_string()),
                })
                .collect(),
            clinical_summary: self.summary.to_string(),
        }
    }
}

/// Ignores the image content and rotates through a fixed pool.
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    cursor: Arc<RotationCursor>,
    latency: Duration,
}

impl MockAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cursor(cursor: Arc<RotationCursor>) -> Self {
        Self {
            cursor,
            latency: Duration::ZERO,
        }
    }

    /// Simulated processing delay before each report.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Pick a report by keyword in `context` (a problem or specialty),
    /// falling back to rotation when nothing matches.
    #[must_use]
    pub fn analyze_for_context(&self, context: &str) -> AnalysisReport {
        let lowered = context.to_lowercase();
        let index = POOL
            .iter()
            .position(|r| r.keywords.iter().any(|k| lowered.contains(k)))
            .unwrap_or_else(|| self.cursor.advance(POOL.len()));
        POOL[index].to_report()
    }
}

impl PrescriptionAnalyzer for MockAnalyzer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, image: &PrescriptionImage) -> Result<AnalysisReport, ExtractionError> {
        let index = self.cursor.advance(POOL.len());
        tracing::debug!(
            mime_type = %image.mime_type,
            bytes = image.bytes.len(),
            index,
            "serving canned analysis report"
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(POOL[index].to_report())
    }
}
