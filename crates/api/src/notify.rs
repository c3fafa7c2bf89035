//! Best-effort user notifications.
//!
//! Notifications are written after the state change they describe has
//! committed. A failure here is logged and swallowed so it can never undo or
//! mask the outcome of the operation that triggered it.

use doneit_core::types::DbId;
use doneit_db::repositories::NotificationRepo;
use doneit_db::DbPool;

/// Insert a notification row for `user_id`, logging instead of failing.
pub async fn send(pool: &DbPool, user_id: DbId, title: &str, message: &str) {
    if let Err(e) = NotificationRepo::create(pool, user_id, title, message).await {
        tracing::warn!(user_id, title, error = %e, "Failed to record notification");
    }
}
