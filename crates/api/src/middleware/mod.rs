//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires [`Role::Admin`](doneit_core::roles::Role).
//! - [`rbac::RequireServiceman`] -- Requires a serviceman token.
//! - [`rbac::RequireCustomer`] -- Requires a customer token.

pub mod auth;
pub mod rbac;
