// Application state module
// Wires configuration, record stores, routes and the renderer together

use std::path::Path;
use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::error::ResourceError;
use crate::handler::{self, Endpoint};
use crate::render::Renderer;
use crate::routing::Router;
use crate::store::Registry;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub registry: Registry,
    pub router: Router<Endpoint>,
    pub renderer: Renderer,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Build state from configuration, opening the configured stores.
    ///
    /// Any `Configuration` error returned here is fatal at startup.
    pub async fn build(config: Config) -> Result<Self, ResourceError> {
        let registry = Registry::from_config(&config.store).await?;
        Self::with_registry(config, registry)
    }

    /// Build state around an already constructed registry
    pub fn with_registry(config: Config, registry: Registry) -> Result<Self, ResourceError> {
        let router = handler::build_router(&registry, &config.routes)?;
        let renderer = Renderer::new(
            config.render.template_dir.as_deref().map(Path::new),
            config.render.default_format,
        )?;
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Ok(Self {
            config,
            registry,
            router,
            renderer,
            cached_access_log,
        })
    }
}
