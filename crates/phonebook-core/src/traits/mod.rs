//! Core traits for the contact-directory service
//!
//! This module defines the seams between the reconciliation core and its
//! collaborators.
//!
//! - [`DirectoryApi`]: CRUD operations against the authoritative collection
//! - [`Confirmer`]: Asynchronous user confirmation gates

pub mod confirmer;
pub mod directory_api;

pub use confirmer::{AutoConfirm, Confirmer};
pub use directory_api::DirectoryApi;
