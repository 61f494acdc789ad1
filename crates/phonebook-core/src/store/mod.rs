//! Repository implementations for the authoritative contact collection

pub mod memory;

pub use memory::MemoryDirectory;
