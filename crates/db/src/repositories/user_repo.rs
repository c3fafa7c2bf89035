//! Repository for the `users` table.

use doneit_core::roles::Role;
use doneit_core::types::DbId;
use sqlx::PgPool;

use crate::models::serviceman::{CreateServicemanProfile, ServicemanProfile};
use crate::models::user::{CreateUser, User};
use crate::repositories::serviceman_repo::PROFILE_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, password_hash, role, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (full_name, email, phone, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Insert a serviceman account and its pending application in one
    /// transaction. The role on `input` is forced to [`Role::Serviceman`].
    pub async fn create_serviceman(
        pool: &PgPool,
        input: &CreateUser,
        profile: &CreateServicemanProfile,
    ) -> Result<(User, ServicemanProfile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (full_name, email, phone, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(Role::Serviceman.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let profile_query = format!(
            "INSERT INTO serviceman_profiles (user_id, skills, location, experience_years)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, ServicemanProfile>(&profile_query)
            .bind(user.id)
            .bind(&profile.skills)
            .bind(&profile.location)
            .bind(profile.experience_years)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
