// Collection module
// Ordered records of one resource type with a monotonic identifier counter

use serde::{Deserialize, Serialize};

use super::record::{Fields, Record};
use crate::error::ResourceError;

/// Ordered set of records.
///
/// Identifiers come from `next_id`, which only ever grows. Removing a
/// record never frees its identifier, so a later insert cannot alias a
/// deleted record the way array-position addressing would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    next_id: u64,
    records: Vec<Record>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    pub const fn new() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }

    /// Build a collection from seed data in order (ids 1, 2, ...)
    pub fn seeded(seed: impl IntoIterator<Item = Fields>) -> Self {
        let mut collection = Self::new();
        for fields in seed {
            collection
                .records
                .push(Record::new(collection.next_id, fields));
            collection.next_id = collection.next_id.saturating_add(1);
        }
        collection
    }

    /// Repair a collection loaded from disk so the counter is ahead of every stored id
    pub fn normalized(mut self) -> Result<Self, ResourceError> {
        let max_id = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| {
            ResourceError::StoreUnavailable(format!(
                "stored id {max_id} leaves no identifiers to assign"
            ))
        })?;
        self.next_id = self.next_id.max(after_max).max(1);
        Ok(self)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a record under the next identifier.
    ///
    /// Fails once the counter cannot advance, so no identifier is handed out twice.
    pub fn insert(&mut self, fields: Fields) -> Result<Record, ResourceError> {
        let following = self.next_id.checked_add(1).ok_or_else(|| {
            ResourceError::StoreUnavailable("identifier space exhausted".to_string())
        })?;
        let record = Record::new(self.next_id, fields);
        self.next_id = following;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Merge fields into an existing record, returning the updated copy
    pub fn update(&mut self, id: u64, fields: Fields) -> Option<Record> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.merge(fields);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: u64) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }
}
