use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Extension, Json,
};
use carefind_core::{AnalysisReport, PrescriptionImage, ValidationError};
use carefind_rx::ExtractionError;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// `POST /api/v1/prescriptions/analyze`
///
/// The body is the raw image; `Content-Type` carries its mime type.
pub(super) async fn analyze_prescription(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let max = state.analysis.max_image_bytes();
    let bytes = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::validation(
                req_id.0.clone(),
                &ValidationError::ImageTooLarge {
                    size: max.saturating_add(1),
                    max,
                },
            )
        } else {
            ApiError::new(req_id.0.clone(), "bad_request", e.body_text())
        }
    })?;

    let mime_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .unwrap_or_default();

    let image = PrescriptionImage::new(bytes.to_vec(), mime_type);
    let report = state
        .analysis
        .analyze(&image)
        .await
        .map_err(|e| match &e {
            ExtractionError::Validation(v) => ApiError::validation(req_id.0.clone(), v),
            ExtractionError::Transport(_) => {
                ApiError::new(req_id.0.clone(), "upstream_unavailable", e.user_message())
            }
            ExtractionError::Schema { .. } | ExtractionError::MissingCredential(_) => {
                ApiError::new(req_id.0.clone(), "extraction_failed", e.user_message())
            }
        })?;

    Ok(Json(ApiResponse::new(report, req_id.0)))
}
