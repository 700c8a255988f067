//! Filter service for narrowing the pet list by status, species and free text.

use crate::models::{Pet, PetStatus};
use tracing::debug;

/// Criteria for filtering pets.
///
/// An empty filter matches every pet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterService {
    status: Option<PetStatus>,
    species: Option<String>,
    search: Option<String>,
}

impl FilterService {
    /// Create a new filter service instance that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Option<PetStatus>) -> Self {
        self.status = status;
        self
    }

    /// Blank values are ignored.
    pub fn with_species(mut self, species: Option<&str>) -> Self {
        self.species = normalize(species);
        self
    }

    /// Blank values are ignored.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = normalize(search);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.species.is_none() && self.search.is_none()
    }

    /// Check a single pet against all criteria.
    ///
    /// `search` is a case-insensitive substring match over name, owner and breed.
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(status) = self.status {
            if pet.status != status {
                return false;
            }
        }

        if let Some(species) = &self.species {
            let same = pet
                .species
                .as_deref()
                .is_some_and(|s| s.trim().to_lowercase() == *species);
            if !same {
                return false;
            }
        }

        if let Some(needle) = &self.search {
            let contains = |field: &str| field.to_lowercase().contains(needle.as_str());
            let hit = contains(&pet.name)
                || contains(&pet.owner)
                || pet.breed.as_deref().is_some_and(contains);
            if !hit {
                return false;
            }
        }

        true
    }

    /// Filter pets, preserving their order.
    pub fn filter_pets(&self, pets: Vec<Pet>) -> Vec<Pet> {
        if self.is_empty() {
            return pets;
        }

        let total = pets.len();
        let result: Vec<Pet> = pets.into_iter().filter(|p| self.matches(p)).collect();
        debug!("Filtered {} pets to {} pets", total, result.len());
        result
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}
