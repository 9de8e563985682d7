use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use carefind_core::{DirectoryEntry, ProviderFilter, ProviderKind};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct DirectoryQuery {
    pub kind: Option<ProviderKind>,
    pub q: Option<String>,
}

/// `GET /api/v1/directory?kind=doctor|hospital&q=term`
pub(super) async fn list_directory(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<DirectoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<DirectoryEntry>>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    let filter = ProviderFilter {
        kind: query.kind,
        term: query.q.unwrap_or_default(),
    };
    let data = state
        .directory
        .filter(&filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse::new(data, req_id.0)))
}
