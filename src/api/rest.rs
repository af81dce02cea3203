//! REST routes for the InvoiceChain ledger.

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers::{create_inspection, get_inspection, list_inspections, verify_inspection};
use crate::server::AppState;

/// Inspection routes, mounted both at the root and under `/api`.
///
/// Any other method on a known path yields 405 through axum's method routing.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inspection/create", post(create_inspection))
        .route("/inspection/all", get(list_inspections))
        .route("/inspection/:id", get(get_inspection))
        .route("/inspection/:id/verify", get(verify_inspection))
}
