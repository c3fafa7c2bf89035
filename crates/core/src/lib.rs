//! Domain primitives shared by the Done-it database and API crates.
//!
//! Nothing in here touches I/O: ids, roles, the domain error type, and pure
//! validation for service requests and accounts.

pub mod accounts;
pub mod error;
pub mod request_lifecycle;
pub mod roles;
pub mod types;
