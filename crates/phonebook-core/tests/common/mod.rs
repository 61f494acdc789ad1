//! Test doubles and common utilities for reconciliation contract tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use phonebook_core::model::{Contact, ContactPayload};
use phonebook_core::traits::{Confirmer, DirectoryApi};
use phonebook_core::{Error, MemoryDirectory, Notifier, Result, SyncController};

/// A confirmer with a scripted answer that records every prompt
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the prompt log, usable after the confirmer is moved
    /// into a controller
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// A directory API whose server is never reachable
pub struct UnreachableApi;

#[async_trait]
impl DirectoryApi for UnreachableApi {
    async fn list(&self) -> Result<Vec<Contact>> {
        Err(Error::network("connection refused"))
    }

    async fn create(&self, _payload: &ContactPayload) -> Result<Contact> {
        Err(Error::network("connection refused"))
    }

    async fn get(&self, _id: &str) -> Result<Contact> {
        Err(Error::network("connection refused"))
    }

    async fn update(&self, _id: &str, _payload: &ContactPayload) -> Result<Contact> {
        Err(Error::network("connection refused"))
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        Err(Error::network("connection refused"))
    }
}

/// The classic four-entry seed collection
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("1", "Arto Hellas", "040-123456"),
        Contact::new("2", "Ada Lovelace", "39-44-5323523"),
        Contact::new("3", "Dan Abramov", "12-43-234345"),
        Contact::new("4", "Mary Poppendieck", "39-23-6423122"),
    ]
}

/// A seeded directory plus a synchronized controller over it
///
/// The directory handle doubles as the "out of band" writer: mutating it
/// directly simulates another client changing server truth behind the
/// controller's back. The returned notifier shares the controller's slot.
pub async fn synced_controller(confirm: bool) -> (MemoryDirectory, SyncController, Notifier) {
    let directory = MemoryDirectory::seeded(seed_contacts()).expect("seed is valid");
    let notifier = Notifier::new();
    let mut controller = SyncController::new(
        Arc::new(directory.clone()),
        Box::new(ScriptedConfirmer::new(confirm)),
        notifier.clone(),
    );
    controller.refresh().await;
    assert_eq!(controller.contacts().len(), 4);
    (directory, controller, notifier)
}
