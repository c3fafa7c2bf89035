//! HTTP-level integration tests for the service catalog and customer checkout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_pending_request, create_serviceman, create_user, get, get_auth, post_auth,
    post_json_auth, seeded_service_id, token_for,
};
use doneit_core::roles::Role;
use doneit_db::models::status::RequestStatus;
use doneit_db::repositories::{NotificationRepo, ServiceRequestRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The catalog is public and lists the seeded services.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_services_is_public(pool: PgPool) {
    let service_id = seeded_service_id(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/services").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(!json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/services/{service_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], service_id);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/services/987654").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// A cart becomes one pending request per line.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_creates_pending_requests(pool: PgPool) {
    let customer = create_user(&pool, "cust", Role::Customer).await;
    let service_id = seeded_service_id(&pool).await;
    let token = token_for(&customer);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "items": [
            { "service_id": service_id, "address": "1 Allen Ave" },
            { "service_id": service_id, "address": "1 Allen Ave", "notes": "back door" },
        ]
    });
    let response = post_json_auth(app, "/api/v1/customer/requests", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let created = json["data"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    for row in created {
        assert_eq!(row["status_id"], RequestStatus::Pending.id());
        assert_eq!(row["customer_id"], customer.id);
        assert!(row["assigned_serviceman_id"].is_null());
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/customer/requests", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

/// One bad line aborts the whole checkout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_with_unknown_service_inserts_nothing(pool: PgPool) {
    let customer = create_user(&pool, "cust", Role::Customer).await;
    let service_id = seeded_service_id(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "items": [
            { "service_id": service_id, "address": "1 Allen Ave" },
            { "service_id": 555_555, "address": "1 Allen Ave" },
        ]
    });
    let response =
        post_json_auth(app, "/api/v1/customer/requests", body, &token_for(&customer)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let rows = ServiceRequestRepo::list_for_customer(&pool, customer.id)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

/// Empty carts are rejected; only customers may check out.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_rejects_empty_cart_and_non_customers(pool: PgPool) {
    let customer = create_user(&pool, "cust", Role::Customer).await;
    let serviceman = create_serviceman(&pool, "sm", true).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/customer/requests",
        serde_json::json!({ "items": [] }),
        &token_for(&customer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let service_id = seeded_service_id(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/customer/requests",
        serde_json::json!({ "items": [{ "service_id": service_id, "address": "x" }] }),
        &token_for(&serviceman),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Customers cannot read each other's requests.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_request_checks_ownership(pool: PgPool) {
    let owner = create_user(&pool, "owner", Role::Customer).await;
    let other = create_user(&pool, "other", Role::Customer).await;
    let request = create_pending_request(&pool, owner.id).await;
    let uri = format!("/api/v1/customer/requests/{}", request.id);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &token_for(&owner)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &uri, &token_for(&other)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cancelling an assigned request notifies the serviceman; a second cancel is 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_assigned_request(pool: PgPool) {
    let customer = create_user(&pool, "cust", Role::Customer).await;
    let serviceman = create_serviceman(&pool, "sm", true).await;
    let request = create_pending_request(&pool, customer.id).await;
    ServiceRequestRepo::claim(&pool, request.id, serviceman.id)
        .await
        .unwrap();
    let token = token_for(&customer);
    let uri = format!("/api/v1/customer/requests/{}/cancel", request.id);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["status_id"],
        RequestStatus::Cancelled.id()
    );

    let notes = NotificationRepo::list_for_user(&pool, serviceman.id, false, 50, 0)
        .await
        .unwrap();
    assert!(notes.iter().any(|n| n.title == "Job cancelled"));

    let app = common::build_test_app(pool);
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A cancelled request can no longer be claimed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_request_cannot_be_accepted(pool: PgPool) {
    let customer = create_user(&pool, "cust", Role::Customer).await;
    let serviceman = create_serviceman(&pool, "sm", true).await;
    let request = create_pending_request(&pool, customer.id).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/customer/requests/{}/cancel", request.id);
    assert_eq!(
        post_auth(app, &uri, &token_for(&customer)).await.status(),
        StatusCode::OK
    );

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/serviceman/accept-job/{}", request.id);
    let response = post_auth(app, &uri, &token_for(&serviceman)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "ALREADY_CLAIMED");
}
