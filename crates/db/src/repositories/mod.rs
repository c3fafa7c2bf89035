//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod notification_repo;
pub mod service_repo;
pub mod service_request_repo;
pub mod serviceman_repo;
pub mod support_ticket_repo;
pub mod user_repo;

pub use notification_repo::NotificationRepo;
pub use service_repo::ServiceRepo;
pub use service_request_repo::ServiceRequestRepo;
pub use serviceman_repo::ServicemanRepo;
pub use support_ticket_repo::SupportTicketRepo;
pub use user_repo::UserRepo;
