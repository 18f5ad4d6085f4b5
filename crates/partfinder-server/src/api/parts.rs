use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use partfinder_core::{PartSearchRequest, PartSearchResponse};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_finder_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct QuickSearchQuery {
    pub part_name: String,
    pub location: Option<String>,
}

pub(super) async fn search_parts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<PartSearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PartSearchResponse>>, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    run_search(&state, req_id, &request).await
}

pub(super) async fn quick_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<QuickSearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PartSearchResponse>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let request = PartSearchRequest::quick(query.part_name, query.location);
    run_search(&state, req_id, &request).await
}

async fn run_search(
    state: &AppState,
    req_id: RequestId,
    request: &PartSearchRequest,
) -> Result<Json<ApiResponse<PartSearchResponse>>, ApiError> {
    let data = state
        .finder
        .find_parts(request)
        .await
        .map_err(|e| map_finder_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
