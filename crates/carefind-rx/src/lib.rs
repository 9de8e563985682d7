//! Prescription photo analysis.
//!
//! [`DocumentExtractionService`] checks the upload, hands it to the configured
//! [`AnalysisBackend`], and returns a fully validated
//! [`AnalysisReport`](carefind_core::AnalysisReport) or an
//! [`ExtractionError`]. There is no partial result.

pub mod backend;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod schema;
pub mod service;

pub use backend::{AnalysisBackend, PrescriptionAnalyzer};
pub use error::ExtractionError;
pub use gemini::GeminiAnalyzer;
pub use mock::MockAnalyzer;
pub use schema::{parse_report, response_schema};
pub use service::DocumentExtractionService;
