//! Repository for serviceman applications (`serviceman_profiles`).

use doneit_core::types::DbId;
use sqlx::PgPool;

use crate::models::serviceman::{ServicemanApplication, ServicemanProfile};
use crate::models::status::ApprovalStatus;

/// Column list for `serviceman_profiles` queries.
pub(crate) const PROFILE_COLUMNS: &str = "user_id, skills, location, experience_years, \
     approval_status_id, reviewed_by, reviewed_at, created_at, updated_at";

/// Provides review operations for serviceman applications.
pub struct ServicemanRepo;

impl ServicemanRepo {
    /// Find the profile attached to a serviceman account.
    pub async fn find_profile(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ServicemanProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM serviceman_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ServicemanProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the serviceman's application has been approved.
    pub async fn is_approved(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM serviceman_profiles \
                 WHERE user_id = $1 AND approval_status_id = $2 \
             )",
        )
        .bind(user_id)
        .bind(ApprovalStatus::Approved.id())
        .fetch_one(pool)
        .await
    }

    /// List applications awaiting review, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<ServicemanApplication>, sqlx::Error> {
        sqlx::query_as::<_, ServicemanApplication>(
            "SELECT p.user_id, u.full_name, u.email, u.phone, p.skills, p.location, \
                    p.experience_years, p.approval_status_id, p.created_at \
             FROM serviceman_profiles p \
             JOIN users u ON u.id = p.user_id \
             WHERE p.approval_status_id = $1 \
             ORDER BY p.created_at ASC",
        )
        .bind(ApprovalStatus::Pending.id())
        .fetch_all(pool)
        .await
    }

    /// Approve or reject a pending application.
    ///
    /// Returns `None` if the profile does not exist or was already reviewed.
    pub async fn review(
        pool: &PgPool,
        user_id: DbId,
        decision: ApprovalStatus,
        reviewer_id: DbId,
    ) -> Result<Option<ServicemanProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE serviceman_profiles \
             SET approval_status_id = $2, reviewed_by = $3, reviewed_at = NOW(), updated_at = NOW() \
             WHERE user_id = $1 AND approval_status_id = $4 \
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, ServicemanProfile>(&query)
            .bind(user_id)
            .bind(decision.id())
            .bind(reviewer_id)
            .bind(ApprovalStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }
}
