//! Health check handler

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::HealthResponse;
use crate::server::AppState;

/// GET /health - Liveness plus the current record count.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let records = state.service.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        service: "invoicechain-ledger",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        records,
    }))
}
