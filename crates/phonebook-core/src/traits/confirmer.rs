// # Confirmer Trait
//
// Asynchronous replacement for blocking confirmation dialogs.
//
// The sync controller asks for confirmation before replacing a number and
// before deleting a contact. Injecting the decision as a trait keeps the
// reconciliation logic exercisable headlessly: tests script the answer, a
// real front end wires the prompt to its dialog surface.

use async_trait::async_trait;

/// Trait for user confirmation gates
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Present `prompt` to the user and resolve to their decision
    ///
    /// Returning `false` aborts the pending operation with no mutation and
    /// no notification.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// A confirmer that accepts every prompt
///
/// Useful for non-interactive front ends and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
