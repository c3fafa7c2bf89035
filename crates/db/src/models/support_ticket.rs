//! Support ticket models.

use doneit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub admin_response: Option<String>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /api/v1/support/tickets`.
#[derive(Debug, Deserialize)]
pub struct CreateSupportTicket {
    pub subject: String,
    pub message: String,
}

/// DTO for `POST /api/v1/admin/support/tickets/{id}/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveSupportTicket {
    pub response: String,
}
