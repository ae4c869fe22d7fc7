// Document store backend
// Mirrors each collection to `<dir>/<resource>.json`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::collection::Collection;
use crate::error::ResourceError;

/// Resolve a connection string to the directory holding collection documents.
///
/// Accepts `file://` URLs and plain filesystem paths.
pub fn parse_connection_string(value: &str) -> Result<PathBuf, ResourceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ResourceError::Configuration(
            "store connection string is empty".to_string(),
        ));
    }

    if !value.contains("://") {
        return Ok(PathBuf::from(value));
    }

    let url = url::Url::parse(value).map_err(|e| {
        ResourceError::Configuration(format!("invalid store connection string '{value}': {e}"))
    })?;
    if url.scheme() != "file" {
        return Err(ResourceError::Configuration(format!(
            "unsupported store scheme '{}' (expected file://)",
            url.scheme()
        )));
    }
    url.to_file_path().map_err(|()| {
        ResourceError::Configuration(format!("store connection string '{value}' is not a local path"))
    })
}

/// Make sure the document directory exists and is usable
pub async fn ensure_dir(dir: &Path) -> Result<(), ResourceError> {
    fs::create_dir_all(dir).await.map_err(|e| {
        ResourceError::StoreUnavailable(format!("cannot open {}: {e}", dir.display()))
    })
}

/// One JSON document holding a whole collection
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(dir: &Path, resource: &str) -> Self {
        Self {
            path: dir.join(format!("{resource}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored collection; `Ok(None)` when no document exists yet
    pub async fn load(&self) -> Result<Option<Collection>, ResourceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ResourceError::StoreUnavailable(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let collection: Collection = serde_json::from_str(&content).map_err(|e| {
            ResourceError::StoreUnavailable(format!(
                "failed to parse {}: {e}",
                self.path.display()
            ))
        })?;
        collection.normalized().map(Some)
    }

    /// Write the collection through a temporary file so readers never see half a document
    pub async fn save(&self, collection: &Collection) -> Result<(), ResourceError> {
        let content = serde_json::to_string_pretty(collection).map_err(|e| {
            ResourceError::StoreUnavailable(format!("failed to serialize collection: {e}"))
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await.map_err(|e| {
            ResourceError::StoreUnavailable(format!("failed to write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            ResourceError::StoreUnavailable(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })
    }
}
