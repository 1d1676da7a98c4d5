//! Storage boundary for the registry
//!
//! The query engine hands validated criteria and an optional cursor to a
//! [`ListExecutor`]; [`MemoryStore`] is the in-process implementation the
//! server runs with.

mod errors;
mod executor;
mod labels;
mod matcher;
mod memory;
mod object;

pub use errors::{StoreError, StoreResult};
pub use executor::{ListExecutor, Page};
pub use labels::{apply_label_changes, LabelChange, LabelOperation};
pub use matcher::{render, CriteriaMatcher};
pub use memory::MemoryStore;
pub use object::StoredObject;
