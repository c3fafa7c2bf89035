//! Handlers for the public `/services` catalog.

use axum::extract::State;
use axum::Json;
use doneit_core::error::CoreError;
use doneit_core::types::DbId;
use doneit_db::models::service::Service;
use doneit_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
///
/// Active services ordered by category, then name. No authentication.
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
///
/// Inactive services are reported as missing.
pub async fn get_service(
    State(state): State<AppState>,
    AppPath(service_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, service_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: service_id,
        }))?;
    Ok(Json(DataResponse { data: service }))
}
