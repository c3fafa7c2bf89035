//! Route definitions for `/admin`. All endpoints require the admin role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /servicemen/pending               -> list_pending_servicemen
/// POST   /servicemen/{user_id}/approve     -> approve_serviceman
/// POST   /servicemen/{user_id}/reject      -> reject_serviceman
/// POST   /users/{user_id}/deactivate       -> deactivate_user
/// GET    /requests                         -> list_requests
/// POST   /services                         -> create_service
/// GET    /support/tickets                  -> list_tickets
/// POST   /support/tickets/{id}/resolve     -> resolve_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/servicemen/pending", get(admin::list_pending_servicemen))
        .route("/servicemen/{user_id}/approve", post(admin::approve_serviceman))
        .route("/servicemen/{user_id}/reject", post(admin::reject_serviceman))
        .route("/users/{user_id}/deactivate", post(admin::deactivate_user))
        .route("/requests", get(admin::list_requests))
        .route("/services", post(admin::create_service))
        .route("/support/tickets", get(admin::list_tickets))
        .route("/support/tickets/{id}/resolve", post(admin::resolve_ticket))
}
