//! Service request models: the rows customers create at checkout and
//! servicemen claim.

use doneit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `service_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRequest {
    pub id: DbId,
    pub customer_id: DbId,
    pub service_id: DbId,
    pub assigned_serviceman_id: Option<DbId>,
    pub status_id: StatusId,
    pub address: String,
    pub notes: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub amount: Option<f64>,
    pub price_finalized: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pending request as shown on the serviceman job board.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailableJob {
    pub id: DbId,
    pub customer_id: DbId,
    pub customer_name: String,
    pub service_id: DbId,
    pub service_name: String,
    pub status_id: StatusId,
    pub address: String,
    pub notes: Option<String>,
    pub scheduled_for: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// One cart line submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItem {
    pub service_id: DbId,
    pub address: String,
    pub notes: Option<String>,
    pub scheduled_for: Option<Timestamp>,
}

/// Query parameters for admin request listing.
#[derive(Debug, Default, Deserialize)]
pub struct RequestListQuery {
    /// Filter by status name (e.g. `pending`).
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Result of a checkout attempt.
#[derive(Debug)]
pub enum CheckoutOutcome {
    Created(Vec<ServiceRequest>),
    /// A cart line referenced a missing or inactive service; nothing was inserted.
    UnknownService(DbId),
}

/// Result of a claim attempt against a single request.
#[derive(Debug)]
pub enum ClaimOutcome {
    /// The request moved from `pending` to `assigned` for this serviceman.
    Claimed(ServiceRequest),
    /// No request with that id exists.
    NotFound,
    /// The request exists but was not `pending` when the update ran.
    AlreadyClaimed,
}

/// Result of a guarded status change (cancel, finalize, complete).
#[derive(Debug)]
pub enum TransitionOutcome {
    Applied(ServiceRequest),
    NotFound,
    /// The guard did not match; carries the row as it is now.
    Rejected(ServiceRequest),
}
