//! Route definitions for `/auth`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register              -> register
/// POST   /register-serviceman   -> register_serviceman
/// POST   /login                 -> login
/// GET    /me                    -> me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/register-serviceman", post(auth::register_serviceman))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}
