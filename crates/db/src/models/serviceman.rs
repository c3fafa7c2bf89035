//! Serviceman application profile models.

use doneit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `serviceman_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServicemanProfile {
    pub user_id: DbId,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: i32,
    pub approval_status_id: StatusId,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pending application joined with the applicant's account details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServicemanApplication {
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: i32,
    pub approval_status_id: StatusId,
    pub created_at: Timestamp,
}

/// Profile fields supplied at serviceman registration.
#[derive(Debug, Clone)]
pub struct CreateServicemanProfile {
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: i32,
}
