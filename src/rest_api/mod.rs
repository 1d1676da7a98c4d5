//! # REST API Module
//!
//! HTTP endpoints for the registry collections. List endpoints accept
//! `fieldQuery`, `labelQuery`, `max_items` and `token`.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::{ListOutcome, PatchRequest, RegistryHandler, RestHandler, API_PREFIX};
pub use parser::ListParams;
pub use response::{encode_query_value, next_link, ListResponse};
pub use server::{app, serve, RestServer};
