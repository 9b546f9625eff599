//! In-memory persistence adapters.
//!
//! Concrete implementations of the card repository and principal directory
//! ports. Both live entirely in process memory; swapping in a database
//! later means adding adapters here without touching the domain layer.

mod memory_card_store;
mod memory_principal_directory;

pub use memory_card_store::MemoryCardStore;
pub use memory_principal_directory::MemoryPrincipalDirectory;
