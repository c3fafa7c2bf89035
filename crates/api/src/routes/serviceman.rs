//! Route definitions for `/serviceman`. All endpoints require the
//! serviceman role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::serviceman;
use crate::state::AppState;

/// Routes mounted at `/serviceman`.
///
/// ```text
/// GET    /available-jobs               -> available_jobs
/// POST   /accept-job/{request_id}      -> accept_job
/// POST   /reject-job/{request_id}      -> reject_job
/// GET    /my-jobs                      -> my_jobs
/// POST   /jobs/{id}/finalize-price     -> finalize_price
/// POST   /jobs/{id}/complete           -> complete_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/available-jobs", get(serviceman::available_jobs))
        .route("/accept-job/{request_id}", post(serviceman::accept_job))
        .route("/reject-job/{request_id}", post(serviceman::reject_job))
        .route("/my-jobs", get(serviceman::my_jobs))
        .route("/jobs/{id}/finalize-price", post(serviceman::finalize_price))
        .route("/jobs/{id}/complete", post(serviceman::complete_job))
}
