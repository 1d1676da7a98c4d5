//! # Pagination
//!
//! Cursor tokens and page-size handling for list endpoints.

pub mod cursor;
pub mod errors;
pub mod page;

pub use cursor::Cursor;
pub use errors::{PageError, PageResult};
pub use page::{PageLimits, PageRequest};
