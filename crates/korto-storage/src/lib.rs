//! Durable store adapters for korto.
//!
//! Both adapters implement the create-only [`Repository`] contract: inserting
//! an existing short code fails with [`StorageError::Conflict`].

pub mod memory;
pub mod mysql;

pub use korto_core::{ReadRepository, Repository, StorageError};
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
