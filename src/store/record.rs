// Record type
// One addressable unit of domain data: a stable identifier plus dynamic fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name reserved for the record identifier
pub const ID_FIELD: &str = "id";

/// Dynamic field set of a record
pub type Fields = Map<String, Value>;

/// A stored record, serialized as a flat object with `id` first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Build a record, discarding any caller-supplied `id` field
    pub fn new(id: u64, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Shallow merge: supplied keys replace existing values, the id never changes
    pub fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
    }
}
