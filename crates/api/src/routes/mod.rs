pub mod admin;
pub mod auth;
pub mod customer;
pub mod health;
pub mod notification;
pub mod serviceman;
pub mod services;
pub mod support;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   customer sign-up (public)
/// /auth/register-serviceman                        serviceman application (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /services                                        catalog (public)
/// /services/{id}                                   single service (public)
///
/// /customer/requests                               checkout, list own
/// /customer/requests/{id}                          get own
/// /customer/requests/{id}/cancel                   cancel own
///
/// /serviceman/available-jobs                       pending requests
/// /serviceman/accept-job/{request_id}              claim (POST)
/// /serviceman/reject-job/{request_id}              pass (POST, no-op)
/// /serviceman/my-jobs                              claimed jobs
/// /serviceman/jobs/{id}/finalize-price             set price (POST)
/// /serviceman/jobs/{id}/complete                   complete (POST)
///
/// /notifications                                   list own
/// /notifications/read-all                          mark all read (POST)
/// /notifications/{id}/read                         mark one read (POST)
///
/// /support/tickets                                 open, list own
///
/// /admin/servicemen/pending                        pending applications
/// /admin/servicemen/{user_id}/approve              approve (POST)
/// /admin/servicemen/{user_id}/reject               reject (POST)
/// /admin/users/{user_id}/deactivate                deactivate account (POST)
/// /admin/requests                                  all requests
/// /admin/services                                  add service (POST)
/// /admin/support/tickets                           all tickets
/// /admin/support/tickets/{id}/resolve              resolve (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/services", services::router())
        .nest("/customer", customer::router())
        .nest("/serviceman", serviceman::router())
        .nest("/notifications", notification::router())
        .nest("/support", support::router())
        .nest("/admin", admin::router())
}
