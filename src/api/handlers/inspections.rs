//! Inspection submission and read handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::CreateInspectionResponse;
use crate::domain::{SubmissionRecord, VerificationReport};
use crate::server::AppState;

/// POST /inspection/create - Validate, hash and append a submission.
pub async fn create_inspection(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CreateInspectionResponse>, ApiError> {
    let Json(raw) = body?;
    let inspection = state.service.create(raw).await?;
    Ok(Json(CreateInspectionResponse::submitted(inspection)))
}

/// GET /inspection/all - Every accepted submission in acceptance order.
pub async fn list_inspections(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionRecord>>, ApiError> {
    Ok(Json(state.service.list_all().await?))
}

/// GET /inspection/:id - A single submission.
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionRecord>, ApiError> {
    Ok(Json(state.service.get(&id).await?))
}

/// GET /inspection/:id/verify - Recompute and compare a stored integrity hash.
pub async fn verify_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VerificationReport>, ApiError> {
    Ok(Json(state.service.verify(&id).await?))
}
