//! Contact entity shared by server and client

use serde::{Deserialize, Serialize};

/// A single entry in the contact directory
///
/// `id` is assigned by the server and is immutable once assigned. `name` is
/// unique across the collection at creation time (exact match,
/// case-sensitive) and never changes afterwards; only `number` is mutable,
/// via an identity-preserving replacement under the existing `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned opaque identifier
    pub id: String,

    /// Display name, unique at creation time
    pub name: String,

    /// Phone number, freely mutable
    pub number: String,
}

impl Contact {
    /// Create a contact with an already-assigned id
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Request body for create and update operations (no id yet)
///
/// Fields default to empty strings so a missing JSON field and an empty one
/// are rejected by the same validation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub number: String,
}

impl ContactPayload {
    /// Create a payload from name and number
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Check that both fields are present and non-empty after trimming
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() || self.number.trim().is_empty() {
            return Err(crate::Error::validation("name or number missing"));
        }
        Ok(())
    }
}
