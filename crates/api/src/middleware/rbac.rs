//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Roles are checked with exhaustive matches on [`Role`], so adding a
//! role forces every gate below to decide about it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use doneit_core::error::CoreError;
use doneit_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the admin role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(RequireAdmin(user)),
            Role::Customer | Role::Serviceman => Err(forbidden("Admin role required")),
        }
    }
}

/// Requires the serviceman role. Rejects with 403 Forbidden otherwise.
///
/// Approval of the serviceman's application is checked separately by the
/// handlers that mutate jobs.
pub struct RequireServiceman(pub AuthUser);

impl FromRequestParts<AppState> for RequireServiceman {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Serviceman => Ok(RequireServiceman(user)),
            Role::Customer | Role::Admin => Err(forbidden("Serviceman role required")),
        }
    }
}

/// Requires the customer role. Rejects with 403 Forbidden otherwise.
pub struct RequireCustomer(pub AuthUser);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Customer => Ok(RequireCustomer(user)),
            Role::Serviceman | Role::Admin => Err(forbidden("Customer role required")),
        }
    }
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.into()))
}
