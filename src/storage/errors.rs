//! Storage errors surfaced by list executors and object maintenance.

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The paging cursor does not identify a stored object
    #[error("cursor does not reference an existing object")]
    CursorNotFound,

    /// No object with the given id
    #[error("object '{0}' not found")]
    NotFound(String),

    /// An object with the given id already exists
    #[error("object '{0}' already exists")]
    Conflict(String),

    /// The submitted object is not storable
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// Anything else; not the client's fault
    #[error("storage failure: {0}")]
    Internal(String),
}

impl StoreError {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::CursorNotFound => "CursorNotFound",
            StoreError::NotFound(_) => "NotFound",
            StoreError::Conflict(_) => "Conflict",
            StoreError::InvalidObject(_) => "InvalidObject",
            StoreError::Internal(_) => "InternalError",
        }
    }
}
