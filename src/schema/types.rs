//! Field type definitions used to type-check field queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a resource field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Integer or floating point
    Number,
    /// Nested JSON object or array
    Json,
    /// Not part of the declared field set
    Unknown,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Json => "json",
            FieldType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A named, typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldDef {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// Resolves the declared type of a field key
pub trait FieldTypeLookup {
    /// `FieldType::Unknown` when the key is not declared
    fn field_type(&self, key: &str) -> FieldType;
}

impl<F> FieldTypeLookup for F
where
    F: Fn(&str) -> FieldType,
{
    fn field_type(&self, key: &str) -> FieldType {
        self(key)
    }
}
