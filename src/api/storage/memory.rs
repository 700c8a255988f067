//! In-memory storage backend.
//!
//! Used when no database is configured and by the test suite. Ids are assigned
//! from a monotonically increasing counter and never reused, like a `SERIAL`
//! column.

use super::{StorageError, traits::StorageBackend};
use crate::models::{NewPet, Pet, PetChanges};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    pets: BTreeMap<i32, Pet>,
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorageBackend {
    state: RwLock<MemoryState>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn list_pets(&self) -> Result<Vec<Pet>, StorageError> {
        let state = self.state.read().await;
        Ok(state.pets.values().rev().cloned().collect())
    }

    async fn get_pet(&self, id: i32) -> Result<Option<Pet>, StorageError> {
        Ok(self.state.read().await.pets.get(&id).cloned())
    }

    async fn create_pet(&self, pet: NewPet) -> Result<Pet, StorageError> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageError::Other("pet id sequence exhausted".to_string()))?;
        state.last_id = id;

        let pet = pet.into_pet(id, Utc::now());
        state.pets.insert(id, pet.clone());
        Ok(pet)
    }

    async fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet, StorageError> {
        let mut state = self.state.write().await;
        let pet = state
            .pets
            .get_mut(&id)
            .ok_or_else(|| StorageError::pet_not_found(id))?;
        changes.apply_to(pet);
        Ok(pet.clone())
    }

    async fn delete_pet(&self, id: i32) -> Result<(), StorageError> {
        self.state
            .write()
            .await
            .pets
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::pet_not_found(id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
