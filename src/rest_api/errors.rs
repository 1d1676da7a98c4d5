//! # REST API Errors
//!
//! Maps engine, pagination and storage errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::pagination::PageError;
use crate::query::QueryError;
use crate::storage::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Description used for every token rejection, malformed or stale alike
const INVALID_TOKEN: &str = "invalid or expired pagination token";

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Rejected `fieldQuery` / `labelQuery`
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Rejected `max_items` or `token`
    #[error(transparent)]
    Page(#[from] PageError),

    /// Collection not served by this registry
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// Invalid request body
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Storage Errors
    // ==================
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Query(_) => StatusCode::BAD_REQUEST,
            RestError::Page(PageError::InvalidPageSize(_)) => StatusCode::BAD_REQUEST,
            RestError::Page(PageError::InvalidToken(_)) => StatusCode::NOT_FOUND,
            RestError::CollectionNotFound(_) => StatusCode::NOT_FOUND,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            RestError::Store(err) => match err {
                StoreError::CursorNotFound => StatusCode::NOT_FOUND,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::InvalidObject(_) => StatusCode::BAD_REQUEST,
                StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Machine-readable kind rendered as `error`
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::Query(err) => err.kind(),
            RestError::Page(err) => err.kind(),
            RestError::CollectionNotFound(_) => "NotFound",
            RestError::InvalidBody(_) => "InvalidBody",
            // Stale cursors look exactly like malformed ones
            RestError::Store(StoreError::CursorNotFound) => "InvalidToken",
            RestError::Store(err) => err.kind(),
        }
    }

    fn description(&self) -> String {
        match self {
            RestError::Page(PageError::InvalidToken(_))
            | RestError::Store(StoreError::CursorNotFound) => INVALID_TOKEN.to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub description: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error: err.kind().to_string(),
            description: err.description(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
