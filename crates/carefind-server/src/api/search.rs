use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use carefind_core::{SearchRequest, SearchResponse};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// `POST /api/v1/search`
///
/// Backend outages still answer 200 with an explanatory narrative; only bad
/// input is an error.
pub(super) async fn search_providers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let response = state
        .search
        .search(&request)
        .await
        .map_err(|e| ApiError::validation(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(response, req_id.0)))
}
