// Store registry
// Builds one record store per configured resource at startup

use std::path::PathBuf;
use std::sync::Arc;

use super::document::{self, DocumentFile};
use super::schema::ResourceSchema;
use super::seed::{self, CatalogEntry};
use super::RecordStore;
use crate::config::{StoreBackend, StoreConfig};
use crate::error::ResourceError;

/// Record stores keyed by resource name, in registration order
#[derive(Default)]
pub struct Registry {
    stores: Vec<Arc<RecordStore>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build stores from configuration, reading the connection string from the process environment
    pub async fn from_config(config: &StoreConfig) -> Result<Self, ResourceError> {
        Self::from_config_with(config, |key| std::env::var(key).ok()).await
    }

    /// Build stores from configuration with an explicit environment lookup
    pub async fn from_config_with(
        config: &StoreConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ResourceError> {
        let entries = select_entries(&config.resources)?;
        let mut registry = Self::new();

        match config.backend {
            StoreBackend::Memory => {
                for entry in entries {
                    let seed = if config.seed { entry.seed } else { Vec::new() };
                    registry.insert(RecordStore::in_memory(entry.schema, seed))?;
                }
            }
            StoreBackend::Document => {
                let dir = resolve_document_dir(config, env(&config.url_env))?;
                document::ensure_dir(&dir).await?;
                for entry in entries {
                    let seed = if config.seed { entry.seed } else { Vec::new() };
                    let file = DocumentFile::new(&dir, entry.schema.name);
                    registry.insert(RecordStore::open(entry.schema, seed, file).await?)?;
                }
            }
        }

        Ok(registry)
    }

    pub fn insert(&mut self, store: RecordStore) -> Result<(), ResourceError> {
        if self.get(store.name()).is_some() {
            return Err(ResourceError::Configuration(format!(
                "resource '{}' registered twice",
                store.name()
            )));
        }
        self.stores.push(Arc::new(store));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RecordStore>> {
        self.stores.iter().find(|s| s.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RecordStore>> {
        self.stores.iter()
    }

    pub fn schemas(&self) -> Vec<&ResourceSchema> {
        self.stores.iter().map(|s| s.schema()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.stores.iter().map(|s| s.name()).collect()
    }
}

/// The document backend has no silent fallback: a missing connection string is fatal
fn resolve_document_dir(
    config: &StoreConfig,
    value: Option<String>,
) -> Result<PathBuf, ResourceError> {
    let value = value.ok_or_else(|| {
        ResourceError::Configuration(format!(
            "store backend 'document' requires the {} environment variable",
            config.url_env
        ))
    })?;
    document::parse_connection_string(&value)
}

fn select_entries(names: &[String]) -> Result<Vec<CatalogEntry>, ResourceError> {
    if names.is_empty() {
        return Ok(seed::catalog());
    }
    names
        .iter()
        .map(|name| {
            seed::find(name).ok_or_else(|| {
                ResourceError::Configuration(format!("unknown resource '{name}' in store.resources"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_config(backend: StoreBackend, resources: &[&str]) -> StoreConfig {
        StoreConfig {
            backend,
            url_env: "RESOURCE_STORE_TEST_URL".to_string(),
            seed: true,
            resources: resources.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn test_memory_registry_uses_whole_catalog() {
        let registry = Registry::from_config_with(&store_config(StoreBackend::Memory, &[]), |_| None)
            .await
            .unwrap();
        assert_eq!(
            registry.names(),
            vec!["hotels", "pokemon", "products", "drinks", "budget"]
        );
        assert!(!registry.get("hotels").unwrap().is_persistent());
    }

    #[tokio::test]
    async fn test_selected_resources_and_unseeded() {
        let mut config = store_config(StoreBackend::Memory, &["pokemon"]);
        config.seed = false;
        let registry = Registry::from_config_with(&config, |_| None).await.unwrap();
        assert_eq!(registry.names(), vec!["pokemon"]);
        assert!(registry.get("pokemon").unwrap().list().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_resource_is_configuration_error() {
        let config = store_config(StoreBackend::Memory, &["unicorns"]);
        let result = Registry::from_config_with(&config, |_| None).await;
        assert!(matches!(result, Err(ResourceError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_document_backend_requires_connection_string() {
        let config = store_config(StoreBackend::Document, &[]);
        let result = Registry::from_config_with(&config, |_| None).await;
        match result {
            Err(ResourceError::Configuration(message)) => {
                assert!(message.contains("RESOURCE_STORE_TEST_URL"));
            }
            _ => panic!("expected configuration error"),
        }
    }

    #[tokio::test]
    async fn test_document_backend_opens_directory() {
        let dir = std::env::temp_dir().join(format!(
            "resource-server-registry-{}",
            std::process::id()
        ));
        let url = format!("file://{}", dir.display());
        let config = store_config(StoreBackend::Document, &["budget"]);

        let registry = Registry::from_config_with(&config, |_| Some(url.clone()))
            .await
            .unwrap();
        assert!(registry.get("budget").unwrap().is_persistent());
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut registry = Registry::new();
        let entry = seed::find("drinks").unwrap();
        registry
            .insert(RecordStore::in_memory(entry.schema.clone(), Vec::new()))
            .unwrap();
        assert!(matches!(
            registry.insert(RecordStore::in_memory(entry.schema, Vec::new())),
            Err(ResourceError::Configuration(_))
        ));
    }
}
