use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool is the only shared mutable resource; it is opened in `main` and
/// closed there after the server stops.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: doneit_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
