//! Resource schema for the registry
//!
//! Declares which fields each resource collection exposes to field
//! queries, and their types. Label keys are schema-less and never
//! appear here.

mod resources;
mod types;

pub use resources::{ResourceSchema, ResourceType};
pub use types::{FieldDef, FieldType, FieldTypeLookup};
