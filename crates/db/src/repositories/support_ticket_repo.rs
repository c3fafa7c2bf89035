//! Repository for the `support_tickets` table.

use doneit_core::accounts::{TICKET_OPEN, TICKET_RESOLVED};
use doneit_core::types::DbId;
use sqlx::PgPool;

use crate::models::support_ticket::{CreateSupportTicket, SupportTicket};

const COLUMNS: &str = "id, user_id, subject, message, status, admin_response, resolved_by, \
                       created_at, updated_at";

/// Provides CRUD operations for support tickets.
pub struct SupportTicketRepo;

impl SupportTicketRepo {
    /// Open a new ticket.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSupportTicket,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id, subject, message, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(input.subject.trim())
            .bind(input.message.trim())
            .bind(TICKET_OPEN)
            .fetch_one(pool)
            .await
    }

    /// A user's own tickets, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Every ticket, open ones first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets \
             ORDER BY (status = 'open') DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a ticket by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an open ticket with an admin response.
    ///
    /// Returns `None` if the ticket does not exist or is already resolved.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        response: &str,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets \
             SET status = $2, admin_response = $3, resolved_by = $4, updated_at = NOW() \
             WHERE id = $1 AND status = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(TICKET_RESOLVED)
            .bind(response.trim())
            .bind(admin_id)
            .bind(TICKET_OPEN)
            .fetch_optional(pool)
            .await
    }
}
