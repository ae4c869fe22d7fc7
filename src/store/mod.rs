//! Record store module
//!
//! Holds the records of each resource type and offers the
//! list/get/create/update/delete contract used by the request handlers.
//! A store keeps its collection in memory and, when backed by a document
//! directory, writes every mutation through to disk before committing it.

mod collection;
pub mod document;
mod record;
mod registry;
pub mod schema;
pub mod seed;

pub use record::{Fields, Record};
pub use registry::Registry;
pub use schema::ResourceSchema;

use tokio::sync::RwLock;

use collection::Collection;
use document::DocumentFile;
use crate::error::ResourceError;
use crate::logger;

/// Store for one resource type
pub struct RecordStore {
    schema: ResourceSchema,
    collection: RwLock<Collection>,
    document: Option<DocumentFile>,
}

impl RecordStore {
    /// Process-lifetime store seeded from static data
    pub fn in_memory(schema: ResourceSchema, seed: Vec<Fields>) -> Self {
        let collection = seeded(&schema, seed);
        Self {
            schema,
            collection: RwLock::new(collection),
            document: None,
        }
    }

    /// Store mirrored to a document file.
    ///
    /// An existing document wins over the seed; otherwise the seed is used
    /// and written out on the first mutation.
    pub async fn open(
        schema: ResourceSchema,
        seed: Vec<Fields>,
        document: DocumentFile,
    ) -> Result<Self, ResourceError> {
        let collection = match document.load().await? {
            Some(stored) => {
                logger::write_info(&format!(
                    "[Store] Loaded {} {} record(s) from {} (next id {})",
                    stored.records().len(),
                    schema.name,
                    document.path().display(),
                    stored.next_id()
                ));
                stored
            }
            None => {
                logger::write_info(&format!(
                    "[Store] No document at {}, starting {} from seed",
                    document.path().display(),
                    schema.name
                ));
                seeded(&schema, seed)
            }
        };
        Ok(Self {
            schema,
            collection: RwLock::new(collection),
            document: Some(document),
        })
    }

    pub const fn name(&self) -> &'static str {
        self.schema.name
    }

    pub const fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub const fn is_persistent(&self) -> bool {
        self.document.is_some()
    }

    /// All records in insertion order
    pub async fn list(&self) -> Vec<Record> {
        self.collection.read().await.records().to_vec()
    }

    pub async fn get(&self, id: u64) -> Result<Record, ResourceError> {
        self.collection
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| ResourceError::not_found(self.name(), id))
    }

    pub async fn create(&self, fields: Fields) -> Result<Record, ResourceError> {
        let mut fields = self.schema.prepare_create(fields)?;
        self.schema.stamp_created(&mut fields, &schema::timestamp());
        self.mutate(|c| c.insert(fields)).await
    }

    pub async fn update(&self, id: u64, fields: Fields) -> Result<Record, ResourceError> {
        let mut fields = self.schema.prepare_update(fields)?;
        self.schema.stamp_updated(&mut fields, &schema::timestamp());
        let name = self.name();
        self.mutate(|c| {
            c.update(id, fields)
                .ok_or_else(|| ResourceError::not_found(name, id))
        })
        .await
    }

    /// Remove a record, returning what was removed
    pub async fn delete(&self, id: u64) -> Result<Record, ResourceError> {
        let name = self.name();
        self.mutate(|c| c.remove(id).ok_or_else(|| ResourceError::not_found(name, id)))
            .await
    }

    /// Apply a mutation under the write lock.
    ///
    /// With a document backend the change is made on a copy and only
    /// committed once the copy has been written.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Collection) -> Result<T, ResourceError>,
    ) -> Result<T, ResourceError> {
        let mut current = self.collection.write().await;
        let Some(document) = &self.document else {
            return op(&mut current);
        };

        let mut next = current.clone();
        let out = op(&mut next)?;
        document.save(&next).await?;
        *current = next;
        Ok(out)
    }
}

/// Seed records are stamped as if created at startup
fn seeded(schema: &ResourceSchema, seed: Vec<Fields>) -> Collection {
    let now = schema::timestamp();
    Collection::seeded(seed.into_iter().map(|mut fields| {
        schema.stamp_created(&mut fields, &now);
        fields
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap_or_default()
    }

    fn hotel_store(seed: Vec<Fields>) -> RecordStore {
        let entry = seed::find("hotels").unwrap();
        RecordStore::in_memory(entry.schema, seed)
    }

    fn pokemon_store() -> RecordStore {
        let entry = seed::find("pokemon").unwrap();
        RecordStore::in_memory(entry.schema, entry.seed)
    }

    #[tokio::test]
    async fn test_hotel_virginia_lifecycle() {
        let store = hotel_store(Vec::new());

        let created = store
            .create(fields(json!({"name": "Hotel Virginia", "rating": 4.3})))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.fields.get("name"), Some(&json!("Hotel Virginia")));
        assert_eq!(created.fields.get("rating"), Some(&json!(4.3)));
        assert!(created.fields.contains_key(schema::CREATED_AT));

        let listed = store.list().await;
        assert_eq!(listed, vec![created.clone()]);

        store.delete(1).await.unwrap();
        assert_eq!(
            store.get(1).await,
            Err(ResourceError::not_found("hotels", 1))
        );
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_returns_fields_plus_id() {
        let store = pokemon_store();
        let input = fields(json!({"name": "Squirtle", "type": ["Water"]}));
        let created = store.create(input.clone()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.fields, input);
        assert_eq!(fetched.id, 5);
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found_everywhere() {
        let store = pokemon_store();
        let missing = 42;
        let expected = ResourceError::not_found("pokemon", missing);
        assert_eq!(store.get(missing).await, Err(expected.clone()));
        assert_eq!(
            store.update(missing, fields(json!({"name": "x"}))).await,
            Err(expected.clone())
        );
        assert_eq!(store.delete(missing).await, Err(expected));
    }

    #[tokio::test]
    async fn test_delete_never_recycles_identifier() {
        let store = hotel_store(Vec::new());
        let a = store.create(fields(json!({"name": "A"}))).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(fields(json!({"name": "B"}))).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(store.get(a.id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = pokemon_store();
        let updated = store
            .update(4, fields(json!({"name": "Charmeleon"})))
            .await
            .unwrap();
        assert_eq!(updated.fields.get("name"), Some(&json!("Charmeleon")));
        assert_eq!(updated.fields.get("type"), Some(&json!(["Fire"])));
    }

    #[tokio::test]
    async fn test_hotel_timestamps() {
        let store = hotel_store(Vec::new());
        let created = store
            .create(fields(json!({"name": "Hotel Virginia", "createdAt": "1999"})))
            .await
            .unwrap();
        let created_at = created.fields.get(schema::CREATED_AT).cloned().unwrap();
        assert_ne!(created_at, json!("1999"));
        assert_eq!(created.fields.get(schema::UPDATED_AT), Some(&created_at));

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = store
            .update(created.id, fields(json!({"rating": 4, "createdAt": "1999"})))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields.get(schema::CREATED_AT), Some(&created_at));
        assert_ne!(updated.fields.get(schema::UPDATED_AT), Some(&created_at));
        assert_eq!(store.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_untimestamped_resources_stay_unstamped() {
        let store = pokemon_store();
        let record = store.get(1).await.unwrap();
        assert!(record.fields.get(schema::CREATED_AT).is_none());

        let entry = seed::find("hotels").unwrap();
        let hotels = RecordStore::in_memory(entry.schema, entry.seed);
        let seeded = hotels.get(1).await.unwrap();
        assert!(seeded.fields.get(schema::CREATED_AT).is_some());
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let store = hotel_store(Vec::new());
        let err = store.create(fields(json!({"rating": 3}))).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_document_store_persists_across_reopen() {
        let dir = std::env::temp_dir().join(format!(
            "resource-server-store-reopen-{}",
            std::process::id()
        ));
        document::ensure_dir(&dir).await.unwrap();
        let entry = seed::find("drinks").unwrap();

        let store = RecordStore::open(
            entry.schema.clone(),
            entry.seed.clone(),
            DocumentFile::new(&dir, "drinks"),
        )
        .await
        .unwrap();
        assert!(store.is_persistent());
        store.delete(3).await.unwrap();
        let latte = store.create(fields(json!({"name": "latte"}))).await.unwrap();
        assert_eq!(latte.id, 4);

        let reopened = RecordStore::open(entry.schema, entry.seed, DocumentFile::new(&dir, "drinks"))
            .await
            .unwrap();
        let ids: Vec<u64> = reopened.list().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        let next = reopened.create(fields(json!({"name": "chai"}))).await.unwrap();
        assert_eq!(next.id, 5);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_collection_untouched() {
        let dir = std::env::temp_dir().join(format!(
            "resource-server-store-unwritable-{}",
            std::process::id()
        ));
        let entry = seed::find("products").unwrap();
        // Directory is never created, so every save fails
        let store = RecordStore::open(entry.schema, entry.seed, DocumentFile::new(&dir, "products"))
            .await
            .unwrap();

        let err = store.delete(1).await.unwrap_err();
        assert!(matches!(err, ResourceError::StoreUnavailable(_)));
        assert!(store.get(1).await.is_ok());
    }
}
