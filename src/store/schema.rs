// Resource schema module
// Declares which fields a resource requires and how submitted values are coerced

use chrono::{SecondsFormat, Utc};
use serde_json::{Number, Value};
use std::fmt;

use super::record::{Fields, ID_FIELD};
use crate::error::ResourceError;

/// Store-assigned creation stamp
pub const CREATED_AT: &str = "createdAt";
/// Store-assigned modification stamp
pub const UPDATED_AT: &str = "updatedAt";

/// Expected shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Any => write!(f, "value"),
        }
    }
}

/// Declared field of a resource
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max: Option<f64>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            max: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            max: None,
        }
    }

    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// HTML input type used by the form template
    pub const fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Number => "number",
            FieldKind::Boolean => "checkbox",
            _ => "text",
        }
    }
}

/// Definition of one CRUD-addressable resource type
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSchema {
    /// URL noun, e.g. `hotels`
    pub name: &'static str,
    /// Human readable title for rendered pages
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Records carry `createdAt`/`updatedAt` set by the store
    pub timestamps: bool,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Coerce and validate the fields of a record about to be created.
    ///
    /// Every required field must be present and non-empty.
    pub fn prepare_create(&self, fields: Fields) -> Result<Fields, ResourceError> {
        let prepared = self.coerce(fields)?;
        for spec in self.fields.iter().filter(|f| f.required) {
            if is_blank(prepared.get(spec.name)) {
                return Err(ResourceError::Validation(format!(
                    "missing required field `{}`",
                    spec.name
                )));
            }
        }
        Ok(prepared)
    }

    /// Coerce and validate a partial update.
    ///
    /// Absent fields keep their stored value, but a required field cannot be blanked.
    pub fn prepare_update(&self, fields: Fields) -> Result<Fields, ResourceError> {
        let supplied: Vec<String> = fields.keys().cloned().collect();
        let prepared = self.coerce(fields)?;
        for spec in self.fields.iter().filter(|f| f.required) {
            if supplied.iter().any(|k| k == spec.name) && is_blank(prepared.get(spec.name)) {
                return Err(ResourceError::Validation(format!(
                    "required field `{}` cannot be empty",
                    spec.name
                )));
            }
        }
        Ok(prepared)
    }

    /// Stamp a new record with its creation and modification time
    pub fn stamp_created(&self, fields: &mut Fields, now: &str) {
        if self.timestamps {
            fields.insert(CREATED_AT.to_string(), Value::String(now.to_string()));
            fields.insert(UPDATED_AT.to_string(), Value::String(now.to_string()));
        }
    }

    /// Refresh the modification time carried by an update
    pub fn stamp_updated(&self, fields: &mut Fields, now: &str) {
        if self.timestamps {
            fields.insert(UPDATED_AT.to_string(), Value::String(now.to_string()));
        }
    }

    fn is_stamp(&self, key: &str) -> bool {
        self.timestamps && (key == CREATED_AT || key == UPDATED_AT)
    }

    fn coerce(&self, fields: Fields) -> Result<Fields, ResourceError> {
        let mut out = Fields::new();
        for (key, value) in fields {
            if key == ID_FIELD || self.is_stamp(&key) {
                continue;
            }
            match self.field(&key) {
                Some(spec) => {
                    if let Some(value) = coerce_value(spec, value)? {
                        out.insert(key, value);
                    }
                }
                None => {
                    out.insert(key, value);
                }
            }
        }
        Ok(out)
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Convert a submitted value to the declared kind.
///
/// Form bodies carry every value as a string, so numbers, booleans and
/// arrays are parsed here. `Ok(None)` drops a blank optional value.
fn coerce_value(spec: &FieldSpec, value: Value) -> Result<Option<Value>, ResourceError> {
    let mismatch = || {
        ResourceError::Validation(format!("field `{}` must be a {}", spec.name, spec.kind))
    };

    let coerced = match (spec.kind, value) {
        (_, Value::Null) => return Ok(None),
        (FieldKind::Any, v) => v,
        (FieldKind::String, Value::String(s)) => Value::String(s),
        (FieldKind::Number, Value::Number(n)) => Value::Number(n),
        (FieldKind::Number, Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            parse_number(s).ok_or_else(mismatch)?
        }
        (FieldKind::Boolean, Value::Bool(b)) => Value::Bool(b),
        (FieldKind::Boolean, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "true" | "on" | "yes" | "1" => Value::Bool(true),
            "false" | "off" | "no" | "0" => Value::Bool(false),
            _ => return Err(mismatch()),
        },
        (FieldKind::Array, Value::Array(items)) => Value::Array(items),
        (FieldKind::Array, Value::String(s)) if s.trim_start().starts_with('[') => {
            match serde_json::from_str::<Value>(&s) {
                Ok(Value::Array(items)) => Value::Array(items),
                _ => return Err(mismatch()),
            }
        }
        (FieldKind::Array, Value::String(s)) => Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        _ => return Err(mismatch()),
    };

    if let (Some(max), Some(n)) = (spec.max, coerced.as_f64()) {
        if n > max {
            return Err(ResourceError::Validation(format!(
                "field `{}` must be at most {max}",
                spec.name
            )));
        }
    }

    Ok(Some(coerced))
}

/// Current time in the form stored in timestamp fields
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
