//! List executor contract
//!
//! The storage-side collaborator that evaluates compiled criteria and a
//! paging cursor. Implementations must enumerate matching objects in a
//! total order that is stable across pages.

use serde_json::Value;

use super::errors::StoreResult;
use crate::pagination::{Cursor, PageRequest};
use crate::query::Query;
use crate::schema::ResourceType;

/// One page of matching objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    /// True iff at least one more matching object follows
    pub has_more: bool,
    /// Position of the last returned item, set iff `has_more`
    pub next_cursor: Option<Cursor>,
    /// Total number of matching objects, when the executor knows it
    pub total: Option<usize>,
}

/// Evaluates validated queries against stored objects
pub trait ListExecutor: Send + Sync {
    /// Fetch the page that follows `cursor` (or the first page).
    ///
    /// A cursor that does not reference a stored object yields
    /// `StoreError::CursorNotFound`.
    fn list(
        &self,
        resource: ResourceType,
        query: &Query,
        page: PageRequest,
        cursor: Option<&Cursor>,
    ) -> StoreResult<Page>;

    /// Count all matching objects
    fn count(&self, resource: ResourceType, query: &Query) -> StoreResult<usize>;
}
