//! Stored resource representation.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use crate::pagination::cursor::SEPARATOR;
use crate::pagination::Cursor;
use crate::query::canonical_json;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const LABELS: &str = "labels";

/// A resource as held by a store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub labels: BTreeMap<String, Vec<String>>,
    /// Full JSON representation, including id, timestamps and labels
    pub body: Map<String, Value>,
}

impl StoredObject {
    /// Normalize a submitted JSON object for storage.
    ///
    /// Missing `id` and timestamps are generated. JSON-valued strings are
    /// canonicalized the same way query operands are.
    pub fn from_json(value: Value, now: DateTime<Utc>) -> StoreResult<StoredObject> {
        let mut body = match value {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidObject(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let id = match body.get(ID) {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(Value::String(id)) if id.is_empty() => {
                return Err(StoreError::InvalidObject("id must not be empty".to_string()))
            }
            Some(Value::String(id)) if id.contains(SEPARATOR) => {
                return Err(StoreError::InvalidObject(format!(
                    "id must not contain '{}'",
                    SEPARATOR
                )))
            }
            Some(Value::String(id)) => id.clone(),
            Some(_) => return Err(StoreError::InvalidObject("id must be a string".to_string())),
        };

        let created_at = timestamp(&body, CREATED_AT)?.unwrap_or(now);
        let updated_at = timestamp(&body, UPDATED_AT)?.unwrap_or(created_at);
        let labels = labels(body.remove(LABELS))?;

        for value in body.values_mut() {
            if let Value::String(s) = value {
                *s = canonical_json(s);
            }
        }

        body.insert(ID.to_string(), Value::String(id.clone()));
        body.insert(CREATED_AT.to_string(), Value::String(format_time(created_at)));
        body.insert(UPDATED_AT.to_string(), Value::String(format_time(updated_at)));
        body.insert(
            LABELS.to_string(),
            serde_json::to_value(&labels).map_err(|e| StoreError::Internal(e.to_string()))?,
        );

        Ok(StoredObject {
            id,
            created_at,
            labels,
            body,
        })
    }

    /// Ordering key: `(created_at, id)`
    pub fn sort_key(&self) -> (DateTime<Utc>, &str) {
        (self.created_at, self.id.as_str())
    }

    /// Cursor pointing at this object
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.created_at, self.id.clone())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.body.clone())
    }

    /// Declared field value; `null` reads as absent
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    pub fn label(&self, key: &str) -> Option<&[String]> {
        self.labels.get(key).map(Vec::as_slice)
    }

    /// Replace the labels and bump `updated_at`. `id` and `created_at`
    /// are untouched, so the paging position stays the same.
    pub fn set_labels(
        &mut self,
        labels: BTreeMap<String, Vec<String>>,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let json =
            serde_json::to_value(&labels).map_err(|e| StoreError::Internal(e.to_string()))?;
        self.body.insert(LABELS.to_string(), json);
        self.body
            .insert(UPDATED_AT.to_string(), Value::String(format_time(now)));
        self.labels = labels;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn format_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn timestamp(body: &Map<String, Value>, key: &str) -> StoreResult<Option<DateTime<Utc>>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| StoreError::InvalidObject(format!("{} is not RFC3339: {}", key, e))),
        Some(_) => Err(StoreError::InvalidObject(format!("{} must be a string", key))),
    }
}

/// Labels are `key -> [values]`; a bare string is a single value
fn labels(raw: Option<Value>) -> StoreResult<BTreeMap<String, Vec<String>>> {
    let map = match raw {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(StoreError::InvalidObject("labels must be an object".to_string())),
    };

    let invalid = |key: &str| {
        StoreError::InvalidObject(format!("label '{}' must hold strings", key))
    };

    let mut labels = BTreeMap::new();
    for (key, value) in map {
        let values = match value {
            Value::String(s) => vec![canonical_json(&s)],
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(canonical_json(&s)),
                    _ => Err(invalid(&key)),
                })
                .collect::<StoreResult<Vec<_>>>()?,
            _ => return Err(invalid(&key)),
        };
        labels.insert(key, values);
    }
    Ok(labels)
}
