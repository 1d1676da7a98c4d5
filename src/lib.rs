//! svcreg - service registry with a filter query language and
//! cursor-based pagination for its list endpoints

pub mod cli;
pub mod config;
pub mod logging;
pub mod pagination;
pub mod query;
pub mod rest_api;
pub mod schema;
pub mod storage;
