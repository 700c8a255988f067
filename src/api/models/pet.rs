use super::enums::PetStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored pet record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub owner: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub status: PetStatus,
    pub price: Option<f64>,
    /// Upload path or inline `data:` URI, stored exactly as submitted
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a pet that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPet {
    pub name: String,
    pub owner: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub status: PetStatus,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl NewPet {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            ..Default::default()
        }
    }

    /// Build the stored record once storage has assigned an id.
    pub fn into_pet(self, id: i32, created_at: DateTime<Utc>) -> Pet {
        Pet {
            id,
            name: self.name,
            owner: self.owner,
            address: self.address,
            contact: self.contact,
            species: self.species,
            breed: self.breed,
            age: self.age,
            weight: self.weight,
            status: self.status,
            price: self.price,
            image_url: self.image_url,
            created_at,
        }
    }
}

/// Partial update of a pet.
///
/// `None` leaves a field untouched. For nullable columns `Some(None)` clears
/// the value and `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetChanges {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub address: Option<Option<String>>,
    pub contact: Option<Option<String>>,
    pub species: Option<Option<String>>,
    pub breed: Option<Option<String>>,
    pub age: Option<Option<i32>>,
    pub weight: Option<Option<f64>>,
    pub status: Option<PetStatus>,
    pub price: Option<Option<f64>>,
    pub image_url: Option<Option<String>>,
}

impl PetChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the provided fields onto `pet`.
    pub fn apply_to(self, pet: &mut Pet) {
        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(owner) = self.owner {
            pet.owner = owner;
        }
        if let Some(address) = self.address {
            pet.address = address;
        }
        if let Some(contact) = self.contact {
            pet.contact = contact;
        }
        if let Some(species) = self.species {
            pet.species = species;
        }
        if let Some(breed) = self.breed {
            pet.breed = breed;
        }
        if let Some(age) = self.age {
            pet.age = age;
        }
        if let Some(weight) = self.weight {
            pet.weight = weight;
        }
        if let Some(status) = self.status {
            pet.status = status;
        }
        if let Some(price) = self.price {
            pet.price = price;
        }
        if let Some(image_url) = self.image_url {
            pet.image_url = image_url;
        }
    }
}

/// Inventory counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PetStats {
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub sold: usize,
}

impl PetStats {
    pub fn from_pets(pets: &[Pet]) -> Self {
        pets.iter().fold(Self::default(), |mut stats, pet| {
            stats.total += 1;
            match pet.status {
                PetStatus::Available => stats.available += 1,
                PetStatus::Reserved => stats.reserved += 1,
                PetStatus::Sold => stats.sold += 1,
            }
            stats
        })
    }
}
