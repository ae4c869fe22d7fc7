//! Request handler module
//!
//! Responsible for request routing dispatch and the work behind each route:
//! record CRUD, the landing page, health probes and the exercise routes.

mod endpoint;
mod exercises;
mod request;
pub mod router;

// Re-export main entry points
pub use endpoint::{build_router, Endpoint};
pub use router::handle_request;
