//! Error taxonomy shared by the store, router and renderer.
//!
//! Store and router failures travel unchanged up to the request handler;
//! only the renderer decides which status code a kind maps to.

use thiserror::Error;

/// Errors produced while serving a resource request or wiring the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// No record with the requested identifier exists in the collection.
    #[error("{resource} {id} not found")]
    NotFound { resource: String, id: String },

    /// A required field is missing or a supplied field is malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No route binding matches the request method and path.
    #[error("no route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// The document store could not be read or written.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Ambiguous route registration or missing startup configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ResourceError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// Stable machine-readable name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::RouteNotFound { .. } => "route_not_found",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Configuration(_) => "configuration_error",
        }
    }
}
