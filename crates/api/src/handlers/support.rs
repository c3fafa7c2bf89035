//! Handlers for `/support/tickets`, available to every signed-in user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use doneit_core::accounts::validate_ticket;
use doneit_db::models::support_ticket::{CreateSupportTicket, SupportTicket};
use doneit_db::repositories::SupportTicketRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/support/tickets
///
/// Open a ticket. Returns 201.
pub async fn create_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSupportTicket>,
) -> AppResult<impl IntoResponse> {
    validate_ticket(&input.subject, &input.message)?;

    let ticket = SupportTicketRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(ticket_id = ticket.id, user_id = auth.user_id, "Support ticket opened");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// GET /api/v1/support/tickets
pub async fn list_my_tickets(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SupportTicket>>>> {
    let tickets = SupportTicketRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: tickets }))
}
