//! Handlers for the `/customer` resource: checkout and the customer's own
//! service requests.
//!
//! Every endpoint requires the customer role via [`RequireCustomer`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use doneit_core::error::CoreError;
use doneit_core::request_lifecycle::{validate_transition, STATUS_ID_CANCELLED};
use doneit_core::types::DbId;
use doneit_db::models::service_request::{
    CheckoutItem, CheckoutOutcome, ServiceRequest, TransitionOutcome,
};
use doneit_db::repositories::ServiceRequestRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCustomer;
use crate::notify;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of lines in a single checkout.
const MAX_CART_ITEMS: usize = 20;

/// Request body for `POST /customer/requests`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a request and verify the caller placed it.
async fn find_owned(state: &AppState, request_id: DbId, auth: &AuthUser) -> AppResult<ServiceRequest> {
    let request = ServiceRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceRequest",
            id: request_id,
        }))?;

    if request.customer_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot access another customer's request".into(),
        )));
    }
    Ok(request)
}

fn validate_cart(items: &[CheckoutItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    if items.len() > MAX_CART_ITEMS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "A checkout may contain at most {MAX_CART_ITEMS} items"
        ))));
    }
    if items.iter().any(|item| item.address.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Every item needs a service address".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/customer/requests
///
/// Check out a cart: one pending request per line, created atomically.
/// Returns 201 with the created requests.
pub async fn checkout(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    validate_cart(&input.items)?;

    let created = match ServiceRequestRepo::checkout(&state.pool, auth.user_id, &input.items).await?
    {
        CheckoutOutcome::Created(rows) => rows,
        CheckoutOutcome::UnknownService(service_id) => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Service",
                id: service_id,
            }));
        }
    };

    tracing::info!(
        customer_id = auth.user_id,
        count = created.len(),
        "Service requests created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/customer/requests
pub async fn list_requests(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServiceRequest>>>> {
    let requests = ServiceRequestRepo::list_for_customer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/customer/requests/{id}
pub async fn get_request(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ServiceRequest>>> {
    let request = find_owned(&state, request_id, &auth).await?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/customer/requests/{id}/cancel
///
/// Cancel a pending or assigned request. Returns 409 if it is already
/// completed or cancelled. The assigned serviceman, if any, is notified.
pub async fn cancel_request(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ServiceRequest>>> {
    find_owned(&state, request_id, &auth).await?;

    let request = match ServiceRequestRepo::cancel(&state.pool, request_id).await? {
        TransitionOutcome::Applied(request) => request,
        TransitionOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "ServiceRequest",
                id: request_id,
            }));
        }
        TransitionOutcome::Rejected(current) => {
            validate_transition(current.status_id, STATUS_ID_CANCELLED)?;
            return Err(AppError::Core(CoreError::Conflict(
                "The request changed while it was being cancelled, try again".into(),
            )));
        }
    };

    tracing::info!(request_id, customer_id = auth.user_id, "Service request cancelled");

    if let Some(serviceman_id) = request.assigned_serviceman_id {
        notify::send(
            &state.pool,
            serviceman_id,
            "Job cancelled",
            &format!("The customer cancelled service request #{request_id}."),
        )
        .await;
    }

    Ok(Json(DataResponse { data: request }))
}
