//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod customer;
pub mod notification;
pub mod serviceman;
pub mod services;
pub mod support;
