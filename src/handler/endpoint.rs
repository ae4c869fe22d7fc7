//! Endpoint table
//!
//! Every route the server answers is registered here, once, at startup.

use hyper::Method;

use crate::config::RoutesConfig;
use crate::error::ResourceError;
use crate::routing::Router;
use crate::store::Registry;

/// What a resource route does with its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    New,
    Show,
    Edit,
    Create,
    Update,
    Delete,
}

/// Handler reference stored in each route binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Home,
    Liveness,
    Readiness,
    Resource {
        resource: &'static str,
        action: Action,
    },
    Greeting,
    Tip,
    Calc,
}

impl Endpoint {
    /// Resource addressed by this endpoint, for access logging
    pub const fn resource(&self) -> Option<&'static str> {
        match self {
            Self::Resource { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}

/// Per-resource routes; `new` is bound before `:id` so it is not captured as an id
fn resource_routes() -> [(Method, &'static str, Action); 7] {
    [
        (Method::GET, "", Action::List),
        (Method::GET, "/new", Action::New),
        (Method::GET, "/:id", Action::Show),
        (Method::GET, "/:id/edit", Action::Edit),
        (Method::POST, "", Action::Create),
        (Method::PUT, "/:id", Action::Update),
        (Method::DELETE, "/:id", Action::Delete),
    ]
}

/// Build the router for every served resource plus the global routes
pub fn build_router(
    registry: &Registry,
    routes: &RoutesConfig,
) -> Result<Router<Endpoint>, ResourceError> {
    let mut router = Router::new();
    router.register(Method::GET, "/", Endpoint::Home)?;

    if routes.health.enabled {
        router.register(Method::GET, &routes.health.liveness_path, Endpoint::Liveness)?;
        router.register(Method::GET, &routes.health.readiness_path, Endpoint::Readiness)?;
    }

    for resource in registry.names() {
        for (method, suffix, action) in resource_routes() {
            router.register(
                method,
                &format!("/{resource}{suffix}"),
                Endpoint::Resource { resource, action },
            )?;
        }
    }

    if routes.exercises {
        router.register(Method::GET, "/greeting/:name", Endpoint::Greeting)?;
        router.register(Method::GET, "/tip/:total/:tipPercentage", Endpoint::Tip)?;
        router.register(Method::GET, "/calc/:num1/:num2", Endpoint::Calc)?;
    }

    Ok(router)
}
