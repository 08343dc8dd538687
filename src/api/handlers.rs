use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::models::{
    OfferExtractionResult, ProcurementRequest, ProcurementRequestCreate, RequestStatus,
    StatusUpdate,
};

/// Query parameters of `GET /requests`.
#[derive(Debug, Default, Deserialize)]
pub struct ListRequestsParams {
    pub status_filter: Option<RequestStatus>,
    pub department: Option<String>,
    pub search: Option<String>,
}

/// Health check.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /requests` - list requests with optional filters.
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<ListRequestsParams>,
) -> Json<Vec<ProcurementRequest>> {
    Json(state.requests.list(
        params.status_filter,
        params.department.as_deref(),
        params.search.as_deref(),
    ))
}

/// `POST /requests` - create a request.
pub async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<ProcurementRequestCreate>,
) -> (StatusCode, Json<ProcurementRequest>) {
    let created = state.requests.create(payload);
    (StatusCode::CREATED, Json(created))
}

/// `GET /requests/{id}` - fetch a single request.
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcurementRequest>, ApiError> {
    state
        .requests
        .get(id)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// `PATCH /requests/{id}/status` - apply a status transition.
pub async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<ProcurementRequest>, ApiError> {
    state
        .requests
        .update_status(id, body.status)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// `POST /offers/parse` - parse an uploaded offer PDF.
///
/// The content type of the `file` part is checked before its body is read.
pub async fn parse_offer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OfferExtractionResult>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if content_type != "application/pdf" {
            return Err(ApiError::UnsupportedContentType(content_type));
        }

        let filename = field.file_name().unwrap_or("offer.pdf").to_string();
        let document = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;

        let result = state.extraction.extract(&filename, &document).await?;
        return Ok(Json(result));
    }

    Err(ApiError::InvalidUpload("no `file` part".to_string()))
}
