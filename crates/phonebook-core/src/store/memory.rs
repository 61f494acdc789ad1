// # Memory Directory
//
// In-memory repository holding the authoritative contact collection.
//
// ## Purpose
//
// The canonical collection lives for the process lifetime only; there is no
// persistence and no multi-writer protocol. All mutation goes through the
// five operations below, each of which holds the write lock for the whole
// check-then-mutate sequence, so uniqueness checks and the mutations they
// guard are atomic.
//
// ## Id Assignment
//
// Ids come from a monotonic counter. The candidate is re-checked against
// the live collection before use so that seeded ids (which may be
// arbitrary strings) can never collide with generated ones. An unchecked
// random draw would not give that guarantee.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Contact, ContactPayload};
use crate::traits::DirectoryApi;
use crate::{Error, Result};

/// Authoritative in-memory contact repository
///
/// The collection is an ordered `Vec` behind a `RwLock`; insertion order is
/// preserved because it is the display order clients see. Cloning the
/// directory clones the handle, not the collection.
///
/// # Example
///
/// ```rust,no_run
/// use phonebook_core::store::MemoryDirectory;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let directory = MemoryDirectory::new();
///
///     let contact = directory.create("Arto Hellas", "040-123456").await?;
///     assert_eq!(directory.get(&contact.id).await?.name, "Arto Hellas");
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    inner: Arc<RwLock<Vec<Contact>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a directory pre-populated with `contacts`
    ///
    /// The seed is validated: duplicate ids or duplicate names are a
    /// configuration error. The id counter starts past the largest numeric
    /// seed id so generated ids never collide with seeded ones.
    pub fn seeded(contacts: Vec<Contact>) -> Result<Self> {
        for (index, contact) in contacts.iter().enumerate() {
            for earlier in &contacts[..index] {
                if earlier.id == contact.id {
                    return Err(Error::config(format!(
                        "seed contains duplicate id: {}",
                        contact.id
                    )));
                }
                if earlier.name == contact.name {
                    return Err(Error::config(format!(
                        "seed contains duplicate name: {}",
                        contact.name
                    )));
                }
            }
        }

        let max_numeric_id = contacts
            .iter()
            .filter_map(|contact| contact.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Ok(Self {
            inner: Arc::new(RwLock::new(contacts)),
            next_id: Arc::new(AtomicU64::new(max_numeric_id + 1)),
        })
    }

    /// Number of contacts currently in the collection
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the collection is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Fetch the full current collection, in insertion order
    pub async fn list(&self) -> Vec<Contact> {
        self.inner.read().await.clone()
    }

    /// Create a contact, assigning a fresh id
    ///
    /// Fails with [`Error::Conflict`] if a contact with the same name
    /// already exists. No state is mutated on failure.
    pub async fn create(&self, name: &str, number: &str) -> Result<Contact> {
        let mut contacts = self.inner.write().await;

        if contacts.iter().any(|contact| contact.name == name) {
            return Err(Error::conflict("name must be unique"));
        }

        // Monotonic draw, re-checked against live ids in case the seed used
        // numeric ids out of order.
        let id = loop {
            let candidate = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
            if !contacts.iter().any(|contact| contact.id == candidate) {
                break candidate;
            }
        };

        let contact = Contact::new(id, name, number);
        contacts.push(contact.clone());
        Ok(contact)
    }

    /// Fetch a single contact by id
    pub async fn get(&self, id: &str) -> Result<Contact> {
        let contacts = self.inner.read().await;
        contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("person not found"))
    }

    /// Replace the number of an existing contact
    ///
    /// The id and name are preserved; only the number changes.
    pub async fn replace_number(&self, id: &str, number: &str) -> Result<Contact> {
        let mut contacts = self.inner.write().await;
        let contact = contacts
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or_else(|| Error::not_found("person not found"))?;

        contact.number = number.to_string();
        Ok(contact.clone())
    }

    /// Delete a contact by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut contacts = self.inner.write().await;
        let position = contacts
            .iter()
            .position(|contact| contact.id == id)
            .ok_or_else(|| Error::not_found("person not found"))?;

        contacts.remove(position);
        Ok(())
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process [`DirectoryApi`] over the repository
///
/// This is the same seam the HTTP client implements, so the sync
/// controller can run against a local directory with no transport at all.
/// Payload validation happens here, mirroring the API layer.
#[async_trait]
impl DirectoryApi for MemoryDirectory {
    async fn list(&self) -> Result<Vec<Contact>> {
        Ok(MemoryDirectory::list(self).await)
    }

    async fn create(&self, payload: &ContactPayload) -> Result<Contact> {
        payload.validate()?;
        MemoryDirectory::create(self, payload.name.trim(), payload.number.trim()).await
    }

    async fn get(&self, id: &str) -> Result<Contact> {
        MemoryDirectory::get(self, id).await
    }

    async fn update(&self, id: &str, payload: &ContactPayload) -> Result<Contact> {
        payload.validate()?;
        MemoryDirectory::replace_number(self, id, payload.number.trim()).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        MemoryDirectory::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let directory = MemoryDirectory::new();

        let first = directory.create("Arto Hellas", "040-123456").await.unwrap();
        let second = directory.create("Ada Lovelace", "39-44-5323523").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(directory.len().await, 2);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_mutation() {
        let directory = MemoryDirectory::new();
        directory.create("Arto Hellas", "040-123456").await.unwrap();

        let err = directory.create("Arto Hellas", "000").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn name_uniqueness_is_case_sensitive() {
        let directory = MemoryDirectory::new();
        directory.create("Arto Hellas", "040-123456").await.unwrap();

        // Exact string match only; a different casing is a different name.
        assert!(directory.create("arto hellas", "000").await.is_ok());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_contact() {
        let directory = MemoryDirectory::new();
        let keep = directory.create("Arto Hellas", "040-123456").await.unwrap();
        let gone = directory.create("Ada Lovelace", "39-44-5323523").await.unwrap();

        directory.delete(&gone.id).await.unwrap();

        assert_eq!(directory.len().await, 1);
        assert!(matches!(
            directory.get(&gone.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert_eq!(directory.get(&keep.id).await.unwrap().name, "Arto Hellas");
    }

    #[tokio::test]
    async fn unknown_id_operations_leave_collection_unchanged() {
        let directory = MemoryDirectory::new();
        directory.create("Arto Hellas", "040-123456").await.unwrap();

        assert!(matches!(
            directory.delete("999").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            directory.replace_number("999", "000").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn replace_number_preserves_id_and_name() {
        let directory = MemoryDirectory::new();
        let contact = directory.create("Arto Hellas", "040-123456").await.unwrap();

        let updated = directory.replace_number(&contact.id, "000").await.unwrap();

        assert_eq!(updated.id, contact.id);
        assert_eq!(updated.name, "Arto Hellas");
        assert_eq!(updated.number, "000");
    }

    #[tokio::test]
    async fn seeded_directory_never_reuses_seed_ids() {
        let seed = vec![
            Contact::new("1", "Arto Hellas", "040-123456"),
            Contact::new("7", "Ada Lovelace", "39-44-5323523"),
        ];
        let directory = MemoryDirectory::seeded(seed).unwrap();

        let created = directory.create("Dan Abramov", "12-43-234345").await.unwrap();
        assert_eq!(created.id, "8");
    }

    #[tokio::test]
    async fn seed_with_duplicate_name_is_rejected() {
        let seed = vec![
            Contact::new("1", "Arto Hellas", "040-123456"),
            Contact::new("2", "Arto Hellas", "000"),
        ];
        assert!(MemoryDirectory::seeded(seed).is_err());
    }

    #[tokio::test]
    async fn api_create_validates_payload() {
        let directory = MemoryDirectory::new();
        let api: &dyn DirectoryApi = &directory;

        let err = api
            .create(&ContactPayload::new("", "040-123456"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(directory.is_empty().await);
    }
}
