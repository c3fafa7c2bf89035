//! Route definitions for `/customer`. All endpoints require the customer role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Routes mounted at `/customer`.
///
/// ```text
/// GET    /requests              -> list_requests
/// POST   /requests              -> checkout
/// GET    /requests/{id}         -> get_request
/// POST   /requests/{id}/cancel  -> cancel_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            get(customer::list_requests).post(customer::checkout),
        )
        .route("/requests/{id}", get(customer::get_request))
        .route("/requests/{id}/cancel", post(customer::cancel_request))
}
