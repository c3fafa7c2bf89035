//! Handlers for the `/admin` resource.
//!
//! Every endpoint requires the admin role via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use doneit_core::error::CoreError;
use doneit_core::request_lifecycle::status_id_from_name;
use doneit_core::types::DbId;
use doneit_db::models::service::CreateService;
use doneit_db::models::service_request::{RequestListQuery, ServiceRequest};
use doneit_db::models::serviceman::{ServicemanApplication, ServicemanProfile};
use doneit_db::models::status::ApprovalStatus;
use doneit_db::models::support_ticket::{ResolveSupportTicket, SupportTicket};
use doneit_db::repositories::{
    ServiceRepo, ServiceRequestRepo, ServicemanRepo, SupportTicketRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::notify;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Serviceman applications
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/servicemen/pending
pub async fn list_pending_servicemen(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServicemanApplication>>>> {
    let applications = ServicemanRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// POST /api/v1/admin/servicemen/{user_id}/approve
pub async fn approve_serviceman(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ServicemanProfile>>> {
    let profile = review(&state, user_id, ApprovalStatus::Approved, admin.user_id).await?;
    notify::send(
        &state.pool,
        user_id,
        "Application approved",
        "Your serviceman application was approved. You can now sign in and accept jobs.",
    )
    .await;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/admin/servicemen/{user_id}/reject
pub async fn reject_serviceman(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ServicemanProfile>>> {
    let profile = review(&state, user_id, ApprovalStatus::Rejected, admin.user_id).await?;
    notify::send(
        &state.pool,
        user_id,
        "Application rejected",
        "Your serviceman application was not approved.",
    )
    .await;
    Ok(Json(DataResponse { data: profile }))
}

/// Decide a pending application. 404 if there is none, 409 if already decided.
async fn review(
    state: &AppState,
    user_id: DbId,
    decision: ApprovalStatus,
    admin_id: DbId,
) -> AppResult<ServicemanProfile> {
    if let Some(profile) = ServicemanRepo::review(&state.pool, user_id, decision, admin_id).await? {
        tracing::info!(
            serviceman_id = user_id,
            admin_id,
            decision = decision.name(),
            "Serviceman application reviewed",
        );
        return Ok(profile);
    }

    match ServicemanRepo::find_profile(&state.pool, user_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "ServicemanProfile",
            id: user_id,
        })),
        Some(current) => {
            let status = ApprovalStatus::from_id(current.approval_status_id)
                .map(ApprovalStatus::name)
                .unwrap_or("reviewed");
            Err(AppError::Core(CoreError::Conflict(format!(
                "Application has already been {status}"
            ))))
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users/{user_id}/deactivate
///
/// Disable an account. Its existing tokens stop working and it can no longer
/// sign in. 404 if the user does not exist, 409 if already inactive or if the
/// admin targets their own account.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(user_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if user_id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot deactivate their own account".into(),
        )));
    }

    if UserRepo::deactivate(&state.pool, user_id).await? {
        tracing::info!(user_id, admin_id = admin.user_id, "User deactivated");
        return Ok(StatusCode::NO_CONTENT);
    }

    match UserRepo::find_by_id(&state.pool, user_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })),
        Some(_) => Err(AppError::Core(CoreError::Conflict(
            "User is already deactivated".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/requests
///
/// All requests, newest first. Optional `status` name filter plus `limit`
/// and `offset`.
pub async fn list_requests(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RequestListQuery>,
) -> AppResult<Json<DataResponse<Vec<ServiceRequest>>>> {
    let status_id = params
        .status
        .as_deref()
        .map(status_id_from_name)
        .transpose()?;
    let requests =
        ServiceRequestRepo::list_all(&state.pool, status_id, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: requests }))
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/services
///
/// Add a service to the catalog. Returns 201, or 409 on a duplicate name.
pub async fn create_service(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateService>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() || input.category.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Service name and category are required".into(),
        )));
    }
    if !input.base_price.is_finite() || input.base_price < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Base price must be a non-negative number".into(),
        )));
    }

    let service = ServiceRepo::create(&state.pool, &input).await?;
    tracing::info!(service_id = service.id, admin_id = admin.user_id, "Service created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

// ---------------------------------------------------------------------------
// Support
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/support/tickets
pub async fn list_tickets(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SupportTicket>>>> {
    let tickets = SupportTicketRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// POST /api/v1/admin/support/tickets/{id}/resolve
///
/// Answer an open ticket and notify its author. 409 if already resolved.
pub async fn resolve_ticket(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(ticket_id): AppPath<DbId>,
    AppJson(input): AppJson<ResolveSupportTicket>,
) -> AppResult<Json<DataResponse<SupportTicket>>> {
    if input.response.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A response is required".into(),
        )));
    }

    let resolved =
        SupportTicketRepo::resolve(&state.pool, ticket_id, admin.user_id, &input.response).await?;
    let ticket = match resolved {
        Some(ticket) => ticket,
        None => {
            return match SupportTicketRepo::find_by_id(&state.pool, ticket_id).await? {
                None => Err(AppError::Core(CoreError::NotFound {
                    entity: "SupportTicket",
                    id: ticket_id,
                })),
                Some(_) => Err(AppError::Core(CoreError::Conflict(
                    "Ticket is already resolved".into(),
                ))),
            };
        }
    };

    tracing::info!(ticket_id, admin_id = admin.user_id, "Support ticket resolved");

    notify::send(
        &state.pool,
        ticket.user_id,
        "Support ticket resolved",
        &format!("Your ticket \"{}\" has a response.", ticket.subject),
    )
    .await;

    Ok(Json(DataResponse { data: ticket }))
}
