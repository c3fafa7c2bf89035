//! Repository for the `services` catalog.

use doneit_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service};

const COLUMNS: &str =
    "id, name, category, description, base_price, is_active, created_at, updated_at";

/// Provides read and create operations for the service catalog.
pub struct ServiceRepo;

impl ServiceRepo {
    /// List active services grouped by category.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services WHERE is_active = true ORDER BY category, name"
        );
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Find a service by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add a service to the catalog.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, category, description, base_price) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .bind(&input.description)
            .bind(input.base_price)
            .fetch_one(pool)
            .await
    }
}
