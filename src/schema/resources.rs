//! Resource collections and their declared field sets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{FieldDef, FieldType, FieldTypeLookup};

/// Resource collections served by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    ServiceInstances,
    ServiceBrokers,
    Platforms,
}

const INSTANCE_FIELDS: &[FieldDef] = &[
    FieldDef::new("id", FieldType::String),
    FieldDef::new("name", FieldType::String),
    FieldDef::new("created_at", FieldType::String),
    FieldDef::new("updated_at", FieldType::String),
    FieldDef::new("generation", FieldType::Number),
    FieldDef::new("service_plan_id", FieldType::String),
    FieldDef::new("platform_id", FieldType::String),
    FieldDef::new("dashboard_url", FieldType::String),
    FieldDef::new("usable", FieldType::String),
    FieldDef::new("ready", FieldType::String),
    FieldDef::new("shared", FieldType::String),
    FieldDef::new("maintenance_info", FieldType::Json),
    FieldDef::new("context", FieldType::Json),
];

const BROKER_FIELDS: &[FieldDef] = &[
    FieldDef::new("id", FieldType::String),
    FieldDef::new("name", FieldType::String),
    FieldDef::new("created_at", FieldType::String),
    FieldDef::new("updated_at", FieldType::String),
    FieldDef::new("generation", FieldType::Number),
    FieldDef::new("description", FieldType::String),
    FieldDef::new("broker_url", FieldType::String),
    FieldDef::new("ready", FieldType::String),
];

const PLATFORM_FIELDS: &[FieldDef] = &[
    FieldDef::new("id", FieldType::String),
    FieldDef::new("name", FieldType::String),
    FieldDef::new("created_at", FieldType::String),
    FieldDef::new("updated_at", FieldType::String),
    FieldDef::new("generation", FieldType::Number),
    FieldDef::new("type", FieldType::String),
    FieldDef::new("description", FieldType::String),
    FieldDef::new("active", FieldType::String),
    FieldDef::new("connections", FieldType::Number),
];

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::ServiceInstances,
        ResourceType::ServiceBrokers,
        ResourceType::Platforms,
    ];

    /// URL path segment, e.g. `service_instances`
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceType::ServiceInstances => "service_instances",
            ResourceType::ServiceBrokers => "service_brokers",
            ResourceType::Platforms => "platforms",
        }
    }

    pub fn from_collection(name: &str) -> Option<ResourceType> {
        Self::ALL.into_iter().find(|r| r.collection() == name)
    }

    pub fn schema(&self) -> ResourceSchema {
        let fields = match self {
            ResourceType::ServiceInstances => INSTANCE_FIELDS,
            ResourceType::ServiceBrokers => BROKER_FIELDS,
            ResourceType::Platforms => PLATFORM_FIELDS,
        };
        ResourceSchema {
            resource: *self,
            fields,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Declared fields of one resource type
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    pub resource: ResourceType,
    pub fields: &'static [FieldDef],
}

impl ResourceSchema {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}

impl FieldTypeLookup for ResourceSchema {
    fn field_type(&self, key: &str) -> FieldType {
        self.fields
            .iter()
            .find(|f| f.name == key)
            .map(|f| f.field_type)
            .unwrap_or(FieldType::Unknown)
    }
}
