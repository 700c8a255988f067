//! Storage trait definitions for the API storage backends.

use super::StorageError;
use crate::models::{NewPet, Pet, PetChanges};

/// Storage backend for pet records.
///
/// Every method maps to a single statement against the backing store.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// All pets, newest id first
    async fn list_pets(&self) -> Result<Vec<Pet>, StorageError>;

    /// Get pet by ID
    async fn get_pet(&self, id: i32) -> Result<Option<Pet>, StorageError>;

    /// Insert a pet and return it with its assigned id
    async fn create_pet(&self, pet: NewPet) -> Result<Pet, StorageError>;

    /// Merge `changes` onto an existing pet.
    ///
    /// Returns `StorageError::NotFound` when no pet has this id.
    async fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet, StorageError>;

    /// Delete a pet.
    ///
    /// Returns `StorageError::NotFound` when no pet has this id.
    async fn delete_pet(&self, id: i32) -> Result<(), StorageError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Release pooled resources during shutdown
    async fn close(&self) {}

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
