#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use doneit_api::app::build_router;
use doneit_api::auth::jwt::{generate_access_token, JwtConfig};
use doneit_api::auth::password::hash_password;
use doneit_api::config::{DatabaseConfig, ServerConfig};
use doneit_api::state::AppState;
use doneit_core::roles::Role;
use doneit_core::types::DbId;
use doneit_db::models::service_request::{CheckoutItem, CheckoutOutcome, ServiceRequest};
use doneit_db::models::serviceman::CreateServicemanProfile;
use doneit_db::models::status::ApprovalStatus;
use doneit_db::models::user::{CreateUser, User};
use doneit_db::repositories::{ServiceRequestRepo, ServicemanRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password given to every user created by these helpers.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database: DatabaseConfig {
            url: "postgres://localhost/doneit_test".to_string(),
            max_connections: 5,
        },
        bootstrap_admin: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_router(state).expect("test router should build")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`]; email is `{name}@doneit.test`.
pub async fn create_user(pool: &PgPool, name: &str, role: Role) -> User {
    let input = CreateUser {
        full_name: name.to_string(),
        email: format!("{name}@doneit.test"),
        phone: None,
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role,
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// Insert a serviceman with a profile, approved unless `approved` is false.
pub async fn create_serviceman(pool: &PgPool, name: &str, approved: bool) -> User {
    let input = CreateUser {
        full_name: name.to_string(),
        email: format!("{name}@doneit.test"),
        phone: None,
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: Role::Serviceman,
    };
    let profile = CreateServicemanProfile {
        skills: vec!["plumbing".to_string()],
        location: Some("Lagos".to_string()),
        experience_years: 3,
    };
    let (user, _) = UserRepo::create_serviceman(pool, &input, &profile)
        .await
        .unwrap();

    if approved {
        let admin = create_user(pool, &format!("{name}-reviewer"), Role::Admin).await;
        ServicemanRepo::review(pool, user.id, ApprovalStatus::Approved, admin.id)
            .await
            .unwrap()
            .expect("fresh application should be pending");
    }
    user
}

/// Sign a token for a user the way login does.
pub fn token_for(user: &User) -> String {
    let role = user.role().unwrap();
    generate_access_token(user.id, role, &test_config().jwt).unwrap()
}

/// Id of the first seeded service.
pub async fn seeded_service_id(pool: &PgPool) -> DbId {
    sqlx::query_scalar("SELECT id FROM services WHERE is_active ORDER BY id LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Create one pending request for `customer_id` via checkout.
pub async fn create_pending_request(pool: &PgPool, customer_id: DbId) -> ServiceRequest {
    let items = [CheckoutItem {
        service_id: seeded_service_id(pool).await,
        address: "12 Marina Road".to_string(),
        notes: None,
        scheduled_for: None,
    }];
    match ServiceRequestRepo::checkout(pool, customer_id, &items)
        .await
        .unwrap()
    {
        CheckoutOutcome::Created(mut rows) => rows.remove(0),
        CheckoutOutcome::UnknownService(id) => panic!("seeded service {id} missing"),
    }
}
