//! Service catalog models.

use doneit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a service to the catalog.
#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub base_price: f64,
}
