//! Routing module
//!
//! Provides method + path-pattern routing:
//! - Literal and `:param` path segments
//! - First-registered-wins dispatch
//! - Duplicate bindings rejected at registration time

mod pattern;
mod router;

pub use pattern::Params;
pub use router::{RouteMatch, Router};
