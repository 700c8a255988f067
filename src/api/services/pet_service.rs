//! Pet service: boundary validation and orchestration of storage calls.
//!
//! All input checks happen here, before the storage backend is touched.
//! Storage "not found" results are surfaced as [`PetServiceError::NotFound`]
//! so callers never confuse them with backend failures.

use crate::models::{NewPet, Pet, PetChanges, PetStats};
use crate::services::FilterService;
use crate::storage::{StorageBackend, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Pet service errors.
#[derive(Debug, Error)]
pub enum PetServiceError {
    /// Missing or invalid input
    #[error("{0}")]
    Validation(String),
    /// No pet with the requested id
    #[error("Pet not found: {0}")]
    NotFound(String),
    /// Backend failure
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for PetServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity_id, .. } => PetServiceError::NotFound(entity_id),
            other => PetServiceError::Storage(other),
        }
    }
}

pub const MISSING_REQUIRED_FIELDS: &str = "Name and owner are required fields";
pub const MISSING_ID: &str = "Pet ID is required";

/// Service for managing pet records.
#[derive(Clone)]
pub struct PetService {
    storage: Arc<dyn StorageBackend>,
}

impl PetService {
    /// Create a new pet service on top of a storage backend.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }

    /// List pets newest first, narrowed by `filter`.
    pub async fn list_pets(&self, filter: &FilterService) -> Result<Vec<Pet>, PetServiceError> {
        let pets = self.storage.list_pets().await?;
        Ok(filter.filter_pets(pets))
    }

    pub async fn get_pet(&self, id: Option<i32>) -> Result<Pet, PetServiceError> {
        let id = require_id(id)?;
        self.storage
            .get_pet(id)
            .await?
            .ok_or_else(|| PetServiceError::NotFound(id.to_string()))
    }

    pub async fn create_pet(&self, pet: NewPet) -> Result<Pet, PetServiceError> {
        validate_new_pet(&pet)?;
        let pet = self.storage.create_pet(pet).await?;
        info!(id = pet.id, name = %pet.name, "Pet created");
        Ok(pet)
    }

    /// Merge `changes` onto the pet identified by `id`.
    pub async fn update_pet(
        &self,
        id: Option<i32>,
        changes: PetChanges,
    ) -> Result<Pet, PetServiceError> {
        let id = require_id(id)?;
        validate_changes(&changes)?;
        let pet = self.storage.update_pet(id, changes).await?;
        info!(id, "Pet updated");
        Ok(pet)
    }

    pub async fn delete_pet(&self, id: Option<i32>) -> Result<(), PetServiceError> {
        let id = require_id(id)?;
        self.storage.delete_pet(id).await?;
        info!(id, "Pet deleted");
        Ok(())
    }

    pub async fn stats(&self) -> Result<PetStats, PetServiceError> {
        let pets = self.storage.list_pets().await?;
        let stats = PetStats::from_pets(&pets);
        debug!(?stats, "Computed pet stats");
        Ok(stats)
    }
}

fn require_id(id: Option<i32>) -> Result<i32, PetServiceError> {
    id.ok_or_else(|| PetServiceError::Validation(MISSING_ID.to_string()))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a pet before insertion.
pub fn validate_new_pet(pet: &NewPet) -> Result<(), PetServiceError> {
    if is_blank(&pet.name) || is_blank(&pet.owner) {
        return Err(PetServiceError::Validation(
            MISSING_REQUIRED_FIELDS.to_string(),
        ));
    }
    validate_measurements(pet.age, pet.weight, pet.price)
}

/// Validate a partial update. Name and owner may be omitted but never blanked.
pub fn validate_changes(changes: &PetChanges) -> Result<(), PetServiceError> {
    let blanked = |field: &Option<String>| field.as_deref().is_some_and(is_blank);
    if blanked(&changes.name) || blanked(&changes.owner) {
        return Err(PetServiceError::Validation(
            "Name and owner cannot be empty".to_string(),
        ));
    }
    validate_measurements(
        changes.age.flatten(),
        changes.weight.flatten(),
        changes.price.flatten(),
    )
}

fn validate_measurements(
    age: Option<i32>,
    weight: Option<f64>,
    price: Option<f64>,
) -> Result<(), PetServiceError> {
    if age.is_some_and(|a| a < 0) {
        return Err(PetServiceError::Validation(
            "Age must be a non-negative number".to_string(),
        ));
    }
    for (field, value) in [("Weight", weight), ("Price", price)] {
        if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
            return Err(PetServiceError::Validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }
    Ok(())
}
