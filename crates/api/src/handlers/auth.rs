//! Handlers for the `/auth` resource (registration, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use doneit_core::accounts::{normalize_skills, validate_email, validate_full_name};
use doneit_core::error::CoreError;
use doneit_core::roles::Role;
use doneit_db::models::serviceman::CreateServicemanProfile;
use doneit_db::models::status::ApprovalStatus;
use doneit_db::models::user::{CreateUser, User, UserResponse};
use doneit_db::repositories::{ServicemanRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` (customers).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Request body for `POST /auth/register-serviceman`.
#[derive(Debug, Deserialize)]
pub struct RegisterServicemanRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub experience_years: Option<i32>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a customer account and sign it in. Returns 201.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let create = prepare_account(
        &state,
        &input.full_name,
        &input.email,
        input.phone.as_deref(),
        &input.password,
        Role::Customer,
    )
    .await?;

    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, "Customer registered");

    let response = build_auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/auth/register-serviceman
///
/// Submit a serviceman application. The account cannot sign in until an
/// admin approves it, so no token is returned. Returns 201.
pub async fn register_serviceman(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterServicemanRequest>,
) -> AppResult<impl IntoResponse> {
    let skills = normalize_skills(&input.skills)?;
    let experience_years = input.experience_years.unwrap_or(0);
    if experience_years < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Experience must not be negative".into(),
        )));
    }

    let create = prepare_account(
        &state,
        &input.full_name,
        &input.email,
        input.phone.as_deref(),
        &input.password,
        Role::Serviceman,
    )
    .await?;

    let profile = CreateServicemanProfile {
        skills,
        location: input
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
        experience_years,
    };

    let (user, _profile) = UserRepo::create_serviceman(&state.pool, &create, &profile).await?;
    tracing::info!(user_id = user.id, "Serviceman application submitted");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user.to_response()?,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Servicemen must be approved first.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    match user.role()? {
        Role::Serviceman => ensure_serviceman_approved(&state, &user).await?,
        Role::Customer | Role::Admin => {}
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    let response = build_auth_response(&state, &user)?;
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/auth/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse {
        data: user.to_response()?,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate registration fields, reject taken emails, and hash the password.
async fn prepare_account(
    state: &AppState,
    full_name: &str,
    email: &str,
    phone: Option<&str>,
    password: &str,
    role: Role,
) -> AppResult<CreateUser> {
    let email = email.trim().to_lowercase();
    validate_full_name(full_name)?;
    validate_email(&email)?;
    validate_password_strength(password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    Ok(CreateUser {
        full_name: full_name.trim().to_string(),
        email,
        phone: phone.map(str::trim).filter(|p| !p.is_empty()).map(String::from),
        password_hash,
        role,
    })
}

/// Servicemen may only sign in once their application is approved.
async fn ensure_serviceman_approved(state: &AppState, user: &User) -> AppResult<()> {
    let profile = ServicemanRepo::find_profile(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No serviceman application on file".into(),
            ))
        })?;

    match ApprovalStatus::from_id(profile.approval_status_id) {
        Some(ApprovalStatus::Approved) => Ok(()),
        Some(ApprovalStatus::Pending) => Err(AppError::Core(CoreError::Forbidden(
            "Serviceman account is awaiting approval".into(),
        ))),
        Some(ApprovalStatus::Rejected) => Err(AppError::Core(CoreError::Forbidden(
            "Serviceman application was rejected".into(),
        ))),
        None => Err(AppError::InternalError(format!(
            "Unknown approval status id {}",
            profile.approval_status_id
        ))),
    }
}

/// Sign a token for `user` and build the response body.
fn build_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let user = user.to_response()?;
    let access_token = generate_access_token(user.id, user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    })
}
