//! Shared data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored record. `id` is assigned on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
}

impl Record {
    /// Create a record with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// A named partition of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    List,
    Notes,
}

impl Collection {
    /// Map an API Gateway resource path to its collection.
    pub fn from_resource(resource: &str) -> Option<Self> {
        match resource {
            "/list" => Some(Collection::List),
            "/notes" => Some(Collection::Notes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::List => "list",
            Collection::Notes => "notes",
        }
    }
}

/// POST body for creating a record.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}
