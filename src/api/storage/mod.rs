//! Storage module for the API.
//!
//! Provides storage backends for PostgreSQL and an in-memory store used when no
//! database is configured.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::MemoryStorageBackend;
pub use postgres::PostgresStorageBackend;
pub use traits::StorageBackend;
