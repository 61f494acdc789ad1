// # phonebook-core
//
// Core library for the contact-directory service.
//
// ## Architecture Overview
//
// This library provides the consistency and reconciliation core shared by
// the server daemon and any client front end:
// - **DirectoryApi**: Trait for performing CRUD operations against the
//   authoritative contact collection (in-process or over HTTP)
// - **Confirmer**: Trait for asynchronous user confirmation gates
// - **MemoryDirectory**: Authoritative in-memory repository with identity
//   and uniqueness enforcement
// - **SyncController**: Client-side orchestrator that keeps a local mirror
//   of the collection consistent with server truth
// - **Notifier**: Single-slot, time-limited user-feedback channel
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Reconciliation logic is separate from
//    transport; the controller only sees the `DirectoryApi` seam
// 2. **Id-Keyed Repair**: Cache mutations are keyed by entity id, never by
//    position, so out-of-order responses resolve safely
// 3. **Single Surfacing**: Every failure resolves into exactly one
//    notification; nothing is retried and nothing escapes the controller
// 4. **Library-First**: All core behavior is exercisable headlessly

pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;
pub mod sync;
pub mod traits;

// Re-export core types for convenience
pub use config::{ClientConfig, NotifyConfig};
pub use error::{Error, Result};
pub use model::{Contact, ContactPayload};
pub use notify::{Notification, Notifier, Severity};
pub use store::MemoryDirectory;
pub use sync::SyncController;
pub use traits::{Confirmer, DirectoryApi};
