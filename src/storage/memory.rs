//! In-memory object store
//!
//! Reference `ListExecutor`: objects are kept per collection, sorted by
//! `(created_at, id)`, which is also the paging order.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::executor::{ListExecutor, Page};
use super::labels::{apply_label_changes, LabelChange};
use super::matcher::CriteriaMatcher;
use super::object::StoredObject;
use crate::pagination::{Cursor, PageRequest};
use crate::query::Query;
use crate::schema::ResourceType;

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<ResourceType, Vec<StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new object, returning its normalized representation
    pub fn insert(&self, resource: ResourceType, value: Value) -> StoreResult<Value> {
        let object = StoredObject::from_json(value, Utc::now())?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;
        let objects = collections.entry(resource).or_default();

        if objects.iter().any(|o| o.id == object.id) {
            return Err(StoreError::Conflict(object.id));
        }

        let position = objects
            .binary_search_by(|o| o.sort_key().cmp(&object.sort_key()))
            .unwrap_or_else(|pos| pos);
        let json = object.to_json();
        debug!(resource = %resource, id = %object.id, "object stored");
        objects.insert(position, object);

        Ok(json)
    }

    pub fn get(&self, resource: ResourceType, id: &str) -> StoreResult<Value> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        collections
            .get(&resource)
            .and_then(|objects| objects.iter().find(|o| o.id == id))
            .map(StoredObject::to_json)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Apply label changes to a stored object, returning its new representation
    pub fn patch_labels(
        &self,
        resource: ResourceType,
        id: &str,
        changes: &[LabelChange],
    ) -> StoreResult<Value> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        let object = collections
            .get_mut(&resource)
            .and_then(|objects| objects.iter_mut().find(|o| o.id == id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let labels = apply_label_changes(&object.labels, changes)?;
        object.set_labels(labels, Utc::now())?;

        debug!(resource = %resource, id = %id, changes = changes.len(), "labels patched");
        Ok(object.to_json())
    }

    pub fn delete(&self, resource: ResourceType, id: &str) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        let objects = collections
            .get_mut(&resource)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let idx = objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        objects.remove(idx);

        debug!(resource = %resource, id = %id, "object deleted");
        Ok(())
    }
}

/// Index of the first object after `cursor`
fn resume_index(objects: &[StoredObject], cursor: Option<&Cursor>) -> StoreResult<usize> {
    match cursor {
        None => Ok(0),
        Some(cursor) => objects
            .binary_search_by(|o| o.sort_key().cmp(&(cursor.timestamp, cursor.id.as_str())))
            .map(|idx| idx + 1)
            .map_err(|_| StoreError::CursorNotFound),
    }
}

impl ListExecutor for MemoryStore {
    fn list(
        &self,
        resource: ResourceType,
        query: &Query,
        page: PageRequest,
        cursor: Option<&Cursor>,
    ) -> StoreResult<Page> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;
        let objects = collections.get(&resource).map(Vec::as_slice).unwrap_or_default();

        let start = resume_index(objects, cursor)?;
        let total = objects
            .iter()
            .filter(|o| CriteriaMatcher::matches(o, query))
            .count();

        let limit = match page {
            PageRequest::CountOnly => {
                return Ok(Page {
                    total: Some(total),
                    ..Page::default()
                })
            }
            PageRequest::Items(limit) => limit,
        };

        // One extra match tells whether another page follows
        let mut window: Vec<&StoredObject> = objects[start..]
            .iter()
            .filter(|o| CriteriaMatcher::matches(o, query))
            .take(limit.saturating_add(1))
            .collect();
        let has_more = window.len() > limit;
        window.truncate(limit);

        let next_cursor = if has_more {
            window.last().map(|o| o.cursor())
        } else {
            None
        };

        Ok(Page {
            items: window.into_iter().map(StoredObject::to_json).collect(),
            has_more,
            next_cursor,
            total: Some(total),
        })
    }

    fn count(&self, resource: ResourceType, query: &Query) -> StoreResult<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;

        Ok(collections
            .get(&resource)
            .map(|objects| {
                objects
                    .iter()
                    .filter(|o| CriteriaMatcher::matches(o, query))
                    .count()
            })
            .unwrap_or(0))
    }
}
