//! # REST API Handler
//!
//! Translates REST requests into registry operations. Listing runs the
//! full query pipeline: page size, filters, token, then the executor.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::errors::{RestError, RestResult};
use super::parser::ListParams;
use super::response::{next_link, ListResponse};
use crate::pagination::{Cursor, PageLimits, PageRequest};
use crate::query::build_query;
use crate::schema::ResourceType;
use crate::storage::{LabelChange, ListExecutor, MemoryStore};

/// Path prefix all collections are served under
pub const API_PREFIX: &str = "/v1";

/// A list page plus the `Link` header pointing at its successor
#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub body: ListResponse<Value>,
    pub link: Option<String>,
}

/// REST handler trait for collection operations
pub trait RestHandler: Send + Sync {
    /// List objects in a collection
    fn list(&self, collection: &str, params: &ListParams) -> RestResult<ListOutcome>;

    /// Get a single object by ID
    fn get(&self, collection: &str, id: &str) -> RestResult<Value>;

    /// Insert an object
    fn insert(&self, collection: &str, data: Value) -> RestResult<Value>;

    /// Apply a PATCH body to an object
    fn patch(&self, collection: &str, id: &str, data: Value) -> RestResult<Value>;

    /// Delete an object
    fn delete(&self, collection: &str, id: &str) -> RestResult<()>;
}

/// PATCH body. Only label changes are supported.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchRequest {
    #[serde(default)]
    pub labels: Vec<LabelChange>,
}

/// Handler backed by the in-memory store
pub struct RegistryHandler {
    store: Arc<MemoryStore>,
    limits: PageLimits,
}

impl RegistryHandler {
    pub fn new(store: Arc<MemoryStore>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    fn resource(collection: &str) -> RestResult<ResourceType> {
        ResourceType::from_collection(collection)
            .ok_or_else(|| RestError::CollectionNotFound(collection.to_string()))
    }
}

impl RestHandler for RegistryHandler {
    fn list(&self, collection: &str, params: &ListParams) -> RestResult<ListOutcome> {
        let resource = Self::resource(collection)?;

        // Page size is checked before any query parsing
        let page = self.limits.resolve(params.max_items.as_deref())?;
        let query = build_query(
            params.field_query.as_deref(),
            params.label_query.as_deref(),
            &resource.schema(),
        )?;
        let cursor = params.token.as_deref().map(Cursor::decode).transpose()?;

        let executor: &dyn ListExecutor = self.store.as_ref();

        let limit = match page {
            PageRequest::CountOnly => {
                let total = executor.count(resource, &query)?;
                debug!(collection, total, "count-only listing");
                return Ok(ListOutcome {
                    body: ListResponse::count_only(total),
                    link: None,
                });
            }
            PageRequest::Items(limit) => limit,
        };

        let result = executor.list(resource, &query, page, cursor.as_ref())?;
        let token = if result.has_more {
            result.next_cursor.as_ref().map(Cursor::encode)
        } else {
            None
        };
        let link = token.as_deref().map(|token| {
            let path = format!("{}/{}", API_PREFIX, resource.collection());
            next_link(&path, params, limit, token)
        });

        debug!(
            collection,
            items = result.items.len(),
            has_more = token.is_some(),
            "listed collection"
        );

        Ok(ListOutcome {
            body: ListResponse {
                items: result.items,
                num_items: result.total,
                has_more_items: token.is_some(),
                token,
            },
            link,
        })
    }

    fn get(&self, collection: &str, id: &str) -> RestResult<Value> {
        let resource = Self::resource(collection)?;
        Ok(self.store.get(resource, id)?)
    }

    fn insert(&self, collection: &str, data: Value) -> RestResult<Value> {
        let resource = Self::resource(collection)?;
        Ok(self.store.insert(resource, data)?)
    }

    fn patch(&self, collection: &str, id: &str, data: Value) -> RestResult<Value> {
        let resource = Self::resource(collection)?;
        let request: PatchRequest =
            serde_json::from_value(data).map_err(|e| RestError::InvalidBody(e.to_string()))?;
        Ok(self.store.patch_labels(resource, id, &request.labels)?)
    }

    fn delete(&self, collection: &str, id: &str) -> RestResult<()> {
        let resource = Self::resource(collection)?;
        Ok(self.store.delete(resource, id)?)
    }
}
