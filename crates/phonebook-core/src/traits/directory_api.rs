// # Directory API Trait
//
// Defines the interface through which the sync controller reaches the
// authoritative contact collection.
//
// ## Implementations
//
// - In-process: `MemoryDirectory` (this crate)
// - HTTP: `phonebook-client-http` crate
//
// ## Constraints on implementations
//
// Implementations are single-shot transports. They must not:
// - Retry failed calls (every failure is terminal for that attempt and is
//   surfaced exactly once by the `SyncController`)
// - Cache results between calls (the client cache is owned by the
//   `SyncController`)
// - Decide whether a failure means the target is gone (reconciliation is
//   owned by the `SyncController`)

use async_trait::async_trait;

use crate::model::{Contact, ContactPayload};

/// Trait for CRUD access to the authoritative contact collection
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Errors
///
/// The error contracts mirror the wire surface:
/// - `create` fails with [`crate::Error::Validation`] when a field is
///   missing or empty, and [`crate::Error::Conflict`] when the name is
///   already taken; state is never mutated on failure
/// - `get`, `update` and `delete` fail with
///   [`crate::Error::NotFound`] for unknown ids
/// - HTTP implementations additionally surface [`crate::Error::Network`]
///   when the server cannot be reached at all
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch the full current collection
    async fn list(&self) -> crate::Result<Vec<Contact>>;

    /// Create a contact from a validated payload
    ///
    /// On success the server has assigned a fresh id, disjoint from all
    /// existing ids, and appended the contact to the collection.
    async fn create(&self, payload: &ContactPayload) -> crate::Result<Contact>;

    /// Fetch a single contact by id
    async fn get(&self, id: &str) -> crate::Result<Contact>;

    /// Replace the number of an existing contact
    ///
    /// The payload mirrors the wire body (`{name, number}`), but an update
    /// is identity-preserving: the stored id and name never change, only
    /// the number is taken from the payload.
    async fn update(&self, id: &str, payload: &ContactPayload) -> crate::Result<Contact>;

    /// Delete a contact by id
    async fn delete(&self, id: &str) -> crate::Result<()>;
}
