//! Shared types, validation, and configuration for carefind.
//!
//! Everything here is backend-agnostic: the request/response shapes that the
//! location and prescription services exchange with their callers, the input
//! checks both sides run before dispatch, and the environment-driven
//! [`AppConfig`] that selects which backing each service uses.

pub mod app_config;
pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod rotation;
pub mod submission;
pub mod validation;

pub use app_config::{AnalysisBackendKind, AppConfig, Environment, SearchBackendKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{Directory, DirectoryEntry, ProviderFilter, ProviderKind};
pub use error::ConfigError;
pub use model::{
    AnalysisReport, MedicineEntry, PlaceResult, PrescriptionImage, SearchRequest, SearchResponse,
};
pub use rotation::RotationCursor;
pub use submission::{SubmissionTicket, SubmissionTracker};
pub use validation::{validate_image, validate_search_request, ValidationError};
