//! Handlers for the `/serviceman` resource: the job board, claiming, and
//! the lifecycle of claimed jobs.
//!
//! Every endpoint requires the serviceman role via [`RequireServiceman`].
//! Endpoints that change a job additionally require an approved application.

use axum::extract::State;
use axum::Json;
use doneit_core::error::CoreError;
use doneit_core::request_lifecycle::{
    validate_amount, validate_completable, validate_transition, STATUS_ID_ASSIGNED,
    STATUS_ID_COMPLETED,
};
use doneit_core::types::DbId;
use doneit_db::models::service_request::{
    AvailableJob, ClaimOutcome, ServiceRequest, TransitionOutcome,
};
use doneit_db::repositories::{ServiceRequestRepo, ServicemanRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireServiceman;
use crate::notify;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Payload of a successful claim.
#[derive(Debug, Serialize)]
pub struct AcceptJobResponse {
    pub message: String,
    pub request: ServiceRequest,
}

/// Request body for `POST /serviceman/jobs/{id}/finalize-price`.
#[derive(Debug, Deserialize)]
pub struct FinalizePriceRequest {
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject servicemen whose application is not approved.
async fn ensure_approved(state: &AppState, serviceman_id: DbId) -> AppResult<()> {
    if ServicemanRepo::is_approved(&state.pool, serviceman_id).await? {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Serviceman account is awaiting approval".into(),
    )))
}

fn request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ServiceRequest",
        id,
    })
}

/// The guard of a job mutation failed: say which part of it.
fn ensure_assigned_to(current: &ServiceRequest, serviceman_id: DbId) -> AppResult<()> {
    if current.assigned_serviceman_id != Some(serviceman_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This job is not assigned to you".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Job board
// ---------------------------------------------------------------------------

/// GET /api/v1/serviceman/available-jobs
///
/// All pending requests, newest first.
pub async fn available_jobs(
    RequireServiceman(auth): RequireServiceman,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AvailableJob>>>> {
    let jobs = ServiceRequestRepo::list_available(&state.pool).await?;
    tracing::debug!(serviceman_id = auth.user_id, count = jobs.len(), "Listed available jobs");
    Ok(Json(DataResponse { data: jobs }))
}

/// POST /api/v1/serviceman/accept-job/{request_id}
///
/// Claim a pending request. Of several servicemen accepting the same request,
/// exactly one succeeds; the others get 404 `ALREADY_CLAIMED`.
pub async fn accept_job(
    RequireServiceman(auth): RequireServiceman,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<AcceptJobResponse>>> {
    ensure_approved(&state, auth.user_id).await?;

    let request = match ServiceRequestRepo::claim(&state.pool, request_id, auth.user_id).await? {
        ClaimOutcome::Claimed(request) => request,
        ClaimOutcome::NotFound => return Err(request_not_found(request_id)),
        ClaimOutcome::AlreadyClaimed => {
            tracing::info!(
                request_id,
                serviceman_id = auth.user_id,
                "Claim rejected, request no longer pending",
            );
            return Err(AppError::Core(CoreError::AlreadyClaimed { id: request_id }));
        }
    };

    tracing::info!(
        request_id,
        serviceman_id = auth.user_id,
        customer_id = request.customer_id,
        "Job accepted",
    );

    notify::send(
        &state.pool,
        request.customer_id,
        "Request accepted",
        &format!("A serviceman has accepted your service request #{request_id}."),
    )
    .await;

    Ok(Json(DataResponse {
        data: AcceptJobResponse {
            message: "Job accepted successfully".into(),
            request,
        },
    }))
}

/// POST /api/v1/serviceman/reject-job/{request_id}
///
/// Acknowledge that the serviceman passes on a request. Nothing is stored and
/// the request stays on the board for others.
pub async fn reject_job(
    RequireServiceman(auth): RequireServiceman,
    AppPath(request_id): AppPath<DbId>,
) -> Json<DataResponse<MessageResponse>> {
    tracing::info!(request_id, serviceman_id = auth.user_id, "Job rejected");
    Json(MessageResponse::new("Job rejected"))
}

// ---------------------------------------------------------------------------
// Claimed jobs
// ---------------------------------------------------------------------------

/// GET /api/v1/serviceman/my-jobs
pub async fn my_jobs(
    RequireServiceman(auth): RequireServiceman,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServiceRequest>>>> {
    let jobs = ServiceRequestRepo::list_for_serviceman(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// POST /api/v1/serviceman/jobs/{id}/finalize-price
///
/// Record the agreed price on an assigned job and notify the customer.
pub async fn finalize_price(
    RequireServiceman(auth): RequireServiceman,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
    AppJson(input): AppJson<FinalizePriceRequest>,
) -> AppResult<Json<DataResponse<ServiceRequest>>> {
    validate_amount(input.amount)?;
    ensure_approved(&state, auth.user_id).await?;

    let outcome =
        ServiceRequestRepo::finalize_price(&state.pool, request_id, auth.user_id, input.amount)
            .await?;
    let request = match outcome {
        TransitionOutcome::Applied(request) => request,
        TransitionOutcome::NotFound => return Err(request_not_found(request_id)),
        TransitionOutcome::Rejected(current) => {
            ensure_assigned_to(&current, auth.user_id)?;
            let reason = if current.status_id == STATUS_ID_ASSIGNED {
                "The job changed while the price was being set, try again"
            } else {
                "The price can only be set while the job is assigned"
            };
            return Err(AppError::Core(CoreError::Conflict(reason.into())));
        }
    };

    tracing::info!(
        request_id,
        serviceman_id = auth.user_id,
        amount = input.amount,
        "Price finalized",
    );

    notify::send(
        &state.pool,
        request.customer_id,
        "Price finalized",
        &format!(
            "The price for service request #{request_id} was set to {:.2}.",
            input.amount
        ),
    )
    .await;

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/serviceman/jobs/{id}/complete
///
/// Mark an assigned, priced job as completed and notify the customer.
pub async fn complete_job(
    RequireServiceman(auth): RequireServiceman,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ServiceRequest>>> {
    ensure_approved(&state, auth.user_id).await?;

    let request = match ServiceRequestRepo::complete(&state.pool, request_id, auth.user_id).await? {
        TransitionOutcome::Applied(request) => request,
        TransitionOutcome::NotFound => return Err(request_not_found(request_id)),
        TransitionOutcome::Rejected(current) => {
            ensure_assigned_to(&current, auth.user_id)?;
            validate_transition(current.status_id, STATUS_ID_COMPLETED)?;
            validate_completable(current.price_finalized)?;
            // The row changed between the guarded update and the re-read.
            return Err(AppError::Core(CoreError::Conflict(
                "The job changed while it was being completed, try again".into(),
            )));
        }
    };

    tracing::info!(request_id, serviceman_id = auth.user_id, "Job completed");

    notify::send(
        &state.pool,
        request.customer_id,
        "Job completed",
        &format!("Your service request #{request_id} has been completed."),
    )
    .await;

    Ok(Json(DataResponse { data: request }))
}
