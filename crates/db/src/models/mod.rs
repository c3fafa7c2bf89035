//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches

pub mod notification;
pub mod service;
pub mod service_request;
pub mod serviceman;
pub mod status;
pub mod support_ticket;
pub mod user;
