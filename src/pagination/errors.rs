//! # Pagination Errors

use thiserror::Error;

/// Result type for pagination parameters
pub type PageResult<T> = Result<T, PageError>;

/// Pagination parameter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Malformed, truncated or unresolvable continuation token
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// `max_items` is negative or not an integer
    #[error("max_items must be a non-negative integer, got '{0}'")]
    InvalidPageSize(String),
}

impl PageError {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PageError::InvalidToken(_) => "InvalidToken",
            PageError::InvalidPageSize(_) => "InvalidPageSize",
        }
    }
}
