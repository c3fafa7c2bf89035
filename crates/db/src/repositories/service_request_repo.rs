//! Repository for the `service_requests` table: the Request Store.
//!
//! Every status change is a single guarded `UPDATE ... WHERE status_id = ...`
//! whose affected-row count decides the outcome. No method reads a status
//! and then writes based on it in a separate statement.

use doneit_core::types::DbId;
use sqlx::PgPool;

use crate::models::service_request::{
    AvailableJob, CheckoutItem, CheckoutOutcome, ClaimOutcome, ServiceRequest, TransitionOutcome,
};
use crate::models::status::{RequestStatus, StatusId};

/// Column list for `service_requests` queries.
const COLUMNS: &str = "\
    id, customer_id, service_id, assigned_serviceman_id, status_id, \
    address, notes, scheduled_for, amount, price_finalized, \
    created_at, updated_at";

/// Maximum page size for request listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for request listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides the lifecycle operations for service requests.
pub struct ServiceRequestRepo;

impl ServiceRequestRepo {
    /// Insert one `pending` request per cart line, all or nothing.
    pub async fn checkout(
        pool: &PgPool,
        customer_id: DbId,
        items: &[CheckoutItem],
    ) -> Result<CheckoutOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO service_requests \
                 (customer_id, service_id, status_id, address, notes, scheduled_for) \
             SELECT $1, s.id, $3, $4, $5, $6 \
             FROM services s \
             WHERE s.id = $2 AND s.is_active = true \
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, ServiceRequest>(&query)
                .bind(customer_id)
                .bind(item.service_id)
                .bind(RequestStatus::Pending.id())
                .bind(item.address.trim())
                .bind(&item.notes)
                .bind(item.scheduled_for)
                .fetch_optional(&mut *tx)
                .await?;

            match row {
                Some(row) => created.push(row),
                // Dropping `tx` rolls back the lines inserted so far.
                None => {
                    tracing::debug!(
                        customer_id,
                        service_id = item.service_id,
                        "Checkout aborted on unknown service",
                    );
                    return Ok(CheckoutOutcome::UnknownService(item.service_id));
                }
            }
        }

        tx.commit().await?;
        Ok(CheckoutOutcome::Created(created))
    }

    /// Atomically claim a pending request for a serviceman.
    ///
    /// The status check and the assignment are one conditional `UPDATE`, so
    /// of any number of concurrent callers exactly one sees a returned row.
    /// When no row is updated, an existence check in the same transaction
    /// tells a missing request apart from one that already left `pending`.
    pub async fn claim(
        pool: &PgPool,
        request_id: DbId,
        serviceman_id: DbId,
    ) -> Result<ClaimOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE service_requests \
             SET status_id = $3, assigned_serviceman_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let claimed = sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(request_id)
            .bind(serviceman_id)
            .bind(RequestStatus::Assigned.id())
            .bind(RequestStatus::Pending.id())
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = match claimed {
            Some(row) => ClaimOutcome::Claimed(row),
            None => {
                let exists: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM service_requests WHERE id = $1)",
                )
                .bind(request_id)
                .fetch_one(&mut *tx)
                .await?;
                if exists {
                    ClaimOutcome::AlreadyClaimed
                } else {
                    ClaimOutcome::NotFound
                }
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// All `pending` requests, newest first, with customer and service names.
    ///
    /// Serviceman skills and location are deliberately not used as filters.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<AvailableJob>, sqlx::Error> {
        sqlx::query_as::<_, AvailableJob>(
            "SELECT r.id, r.customer_id, u.full_name AS customer_name, \
                    r.service_id, s.name AS service_name, r.status_id, \
                    r.address, r.notes, r.scheduled_for, r.created_at \
             FROM service_requests r \
             JOIN users u ON u.id = r.customer_id \
             JOIN services s ON s.id = r.service_id \
             WHERE r.status_id = $1 \
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(RequestStatus::Pending.id())
        .fetch_all(pool)
        .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_requests WHERE id = $1");
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A customer's own requests, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests \
             WHERE customer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Requests assigned to a serviceman, newest first.
    pub async fn list_for_serviceman(
        pool: &PgPool,
        serviceman_id: DbId,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests \
             WHERE assigned_serviceman_id = $1 \
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(serviceman_id)
            .fetch_all(pool)
            .await
    }

    /// List all requests (admin view) with optional status filter and pagination.
    pub async fn list_all(
        pool: &PgPool,
        status_id: Option<StatusId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = match status_id {
            Some(_) => format!(
                "SELECT {COLUMNS} FROM service_requests \
                 WHERE status_id = $3 \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $1 OFFSET $2"
            ),
            None => format!(
                "SELECT {COLUMNS} FROM service_requests \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $1 OFFSET $2"
            ),
        };

        let mut q = sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(sid) = status_id {
            q = q.bind(sid);
        }
        q.fetch_all(pool).await
    }

    /// Cancel a request that is still `pending` or `assigned`.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<TransitionOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests \
             SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($3, $4) \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(RequestStatus::Cancelled.id())
            .bind(RequestStatus::Pending.id())
            .bind(RequestStatus::Assigned.id())
            .fetch_optional(pool)
            .await?;
        Self::resolve_outcome(pool, id, updated).await
    }

    /// Record the agreed price. Only the assigned serviceman, only while `assigned`.
    pub async fn finalize_price(
        pool: &PgPool,
        id: DbId,
        serviceman_id: DbId,
        amount: f64,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests \
             SET amount = $3, price_finalized = true, updated_at = NOW() \
             WHERE id = $1 AND assigned_serviceman_id = $2 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(serviceman_id)
            .bind(amount)
            .bind(RequestStatus::Assigned.id())
            .fetch_optional(pool)
            .await?;
        Self::resolve_outcome(pool, id, updated).await
    }

    /// Mark an assigned, priced job as completed.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        serviceman_id: DbId,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests \
             SET status_id = $3, updated_at = NOW() \
             WHERE id = $1 AND assigned_serviceman_id = $2 \
               AND status_id = $4 AND price_finalized = true \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(serviceman_id)
            .bind(RequestStatus::Completed.id())
            .bind(RequestStatus::Assigned.id())
            .fetch_optional(pool)
            .await?;
        Self::resolve_outcome(pool, id, updated).await
    }

    /// Turn the result of a guarded update into a [`TransitionOutcome`].
    ///
    /// The follow-up read only explains a rejection; it never feeds a write.
    async fn resolve_outcome(
        pool: &PgPool,
        id: DbId,
        updated: Option<ServiceRequest>,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        if let Some(row) = updated {
            return Ok(TransitionOutcome::Applied(row));
        }
        Ok(match Self::find_by_id(pool, id).await? {
            Some(current) => TransitionOutcome::Rejected(current),
            None => TransitionOutcome::NotFound,
        })
    }
}
