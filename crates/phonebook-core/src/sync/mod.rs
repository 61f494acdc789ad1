//! Client-side sync controller
//!
//! The controller keeps a local mirror of the server's contact collection
//! and reconciles user intent against it:
//!
//! ```text
//! user intent ──► SyncController ──► DirectoryApi ──► server
//!                      │                                 │
//!                      ├── cache (mirror, may be stale) ◄┘ response
//!                      └── Notifier (one message per outcome)
//! ```
//!
//! ## Reconciliation Rules
//!
//! - The cache may reference contacts the server has since deleted; that
//!   staleness is expected and repaired reactively, never retried.
//! - A failed update or delete is treated as authoritative evidence that
//!   the target is gone server-side: the stale entry is removed by id.
//! - Cache mutations are keyed by id, never by position, so responses
//!   arriving out of order update or remove exactly the entry they name.
//! - Every failure path resolves into exactly one notification.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::{Contact, ContactPayload};
use crate::notify::Notifier;
use crate::traits::{Confirmer, DirectoryApi};

/// Orchestrates create/update/delete intents against the directory
///
/// Owns the client cache (ordered mirror of the collection), the two
/// pending-input slots mirroring unsaved user entry, and the search term
/// for the view-level filter.
pub struct SyncController {
    api: Arc<dyn DirectoryApi>,
    confirmer: Box<dyn Confirmer>,
    notifier: Notifier,

    /// Local mirror of the server collection; order is display order
    contacts: Vec<Contact>,

    /// Pending user input, unsaved until a successful submit
    draft_name: String,
    draft_number: String,

    /// View-level filter term
    search: String,
}

impl SyncController {
    /// Create a controller with an empty cache
    pub fn new(api: Arc<dyn DirectoryApi>, confirmer: Box<dyn Confirmer>, notifier: Notifier) -> Self {
        Self {
            api,
            confirmer,
            notifier,
            contacts: Vec::new(),
            draft_name: String::new(),
            draft_number: String::new(),
            search: String::new(),
        }
    }

    /// Initial synchronization: fetch the full collection once
    ///
    /// On failure the cache is left empty and one error notification is
    /// emitted. There is no retry.
    pub async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "initial snapshot fetched");
                self.contacts = contacts;
            }
            Err(err) => {
                warn!(%err, "initial snapshot fetch failed");
                self.notifier.error("failed to fetch contacts from server");
            }
        }
    }

    /// Submit the pending name/number as an add-or-update intent
    ///
    /// A cache hit on the exact name routes to an update behind a
    /// confirmation gate; a miss routes to a create. See module docs for
    /// the repair rules on failure.
    pub async fn submit(&mut self) {
        let name = self.draft_name.trim().to_string();
        let number = self.draft_number.trim().to_string();

        if name.is_empty() || number.is_empty() {
            self.notifier.error("name and number are required");
            return;
        }

        // Exact, case-sensitive match: the same rule the server enforces.
        if let Some(existing) = self
            .contacts
            .iter()
            .find(|contact| contact.name == name)
            .cloned()
        {
            self.replace_existing(existing, &number).await;
            return;
        }

        match self.api.create(&ContactPayload::new(&name, &number)).await {
            Ok(created) => {
                self.contacts.push(created.clone());
                self.clear_drafts();
                self.notifier.success(format!("Added {}", created.name));
            }
            Err(err) => {
                // The entry was never optimistically added; nothing to repair.
                warn!(%err, %name, "create rejected");
                self.notifier
                    .error(format!("failed to add {name}: {err}"));
            }
        }
    }

    /// Replace the number of a cached contact after confirmation
    async fn replace_existing(&mut self, existing: Contact, number: &str) {
        let prompt = format!(
            "{} is already added to phonebook, replace the old number with a new one?",
            existing.name
        );
        if !self.confirmer.confirm(&prompt).await {
            return;
        }

        let payload = ContactPayload::new(&existing.name, number);
        match self.api.update(&existing.id, &payload).await {
            Ok(updated) => {
                if let Some(slot) = self
                    .contacts
                    .iter_mut()
                    .find(|contact| contact.id == existing.id)
                {
                    *slot = updated.clone();
                }
                self.clear_drafts();
                self.notifier
                    .success(format!("Updated {}'s number", updated.name));
            }
            Err(err) => {
                // A failed update is authoritative evidence of deletion:
                // drop the stale entry so the mirror matches server truth.
                warn!(%err, id = %existing.id, "update failed, repairing stale entry");
                self.contacts.retain(|contact| contact.id != existing.id);
                self.notifier.error(format!(
                    "the contact '{}' was already removed from the server",
                    existing.name
                ));
            }
        }
    }

    /// Delete a cached contact by id after confirmation
    ///
    /// The entry leaves the cache on both outcomes; only the notification
    /// wording differs. An id not present in the cache is a no-op.
    pub async fn remove(&mut self, id: &str) {
        let Some(target) = self
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
        else {
            return;
        };

        if !self.confirmer.confirm(&format!("Delete {}?", target.name)).await {
            return;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.contacts.retain(|contact| contact.id != id);
                self.notifier.success(format!("Deleted {}", target.name));
            }
            Err(err) => {
                warn!(%err, id, "delete failed, repairing stale entry");
                self.contacts.retain(|contact| contact.id != id);
                self.notifier.error(format!(
                    "the contact '{}' was already removed from the server",
                    target.name
                ));
            }
        }
    }

    /// Set the pending name input
    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft_name = name.into();
    }

    /// Set the pending number input
    pub fn set_draft_number(&mut self, number: impl Into<String>) {
        self.draft_number = number.into();
    }

    /// Set the view-level filter term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// The full cached collection, in display order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The cached collection filtered by the search term
    ///
    /// Case-insensitive substring match on `name`; a pure projection that
    /// never mutates the cache.
    pub fn visible(&self) -> Vec<&Contact> {
        let term = self.search.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.name.to_lowercase().contains(&term))
            .collect()
    }

    /// The pending input slots, as (name, number)
    pub fn drafts(&self) -> (&str, &str) {
        (&self.draft_name, &self.draft_number)
    }

    fn clear_drafts(&mut self) {
        self.draft_name.clear();
        self.draft_number.clear();
    }
}
