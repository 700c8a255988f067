//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the StorageBackend trait.

use super::{StorageError, traits::StorageBackend};
use crate::models::{NewPet, Pet, PetChanges, PetStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::{debug, info};

const PET_COLUMNS: &str = "id, name, owner, address, contact, species, breed, age, weight, \
     status, price, image_url, created_at";

/// Row shape of the `petlogix` table.
#[derive(Debug, FromRow)]
struct PetRow {
    id: i32,
    name: String,
    owner: String,
    address: Option<String>,
    contact: Option<String>,
    species: Option<String>,
    breed: Option<String>,
    age: Option<i32>,
    weight: Option<f64>,
    status: String,
    price: Option<f64>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PetRow> for Pet {
    type Error = StorageError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let status: PetStatus = row
            .status
            .parse()
            .map_err(|e| StorageError::Other(format!("Pet {} has {}", row.id, e)))?;

        Ok(Pet {
            id: row.id,
            name: row.name,
            owner: row.owner,
            address: row.address,
            contact: row.contact,
            species: row.species,
            breed: row.breed,
            age: row.age,
            weight: row.weight,
            status,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL storage backend implementation.
pub struct PostgresStorageBackend {
    pool: PgPool,
}

impl PostgresStorageBackend {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| {
                StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;

        info!(max_connections, "PostgreSQL storage ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StorageBackend for PostgresStorageBackend {
    async fn list_pets(&self) -> Result<Vec<Pet>, StorageError> {
        let rows = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM petlogix ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Pet::try_from).collect()
    }

    async fn get_pet(&self, id: i32) -> Result<Option<Pet>, StorageError> {
        let row = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM petlogix WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Pet::try_from).transpose()
    }

    async fn create_pet(&self, pet: NewPet) -> Result<Pet, StorageError> {
        let row = sqlx::query_as::<_, PetRow>(&format!(
            r#"
            INSERT INTO petlogix (name, owner, address, contact, species, breed, age, weight, status, price, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(pet.name)
        .bind(pet.owner)
        .bind(pet.address)
        .bind(pet.contact)
        .bind(pet.species)
        .bind(pet.breed)
        .bind(pet.age)
        .bind(pet.weight)
        .bind(pet.status.as_str())
        .bind(pet.price)
        .bind(pet.image_url)
        .fetch_one(&self.pool)
        .await?;

        Pet::try_from(row)
    }

    async fn update_pet(&self, id: i32, changes: PetChanges) -> Result<Pet, StorageError> {
        if changes.is_empty() {
            debug!(id, "Empty update, returning current row");
            return self
                .get_pet(id)
                .await?
                .ok_or_else(|| StorageError::pet_not_found(id));
        }

        let mut builder = update_statement(id, changes);
        let row = builder
            .build_query_as::<PetRow>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::pet_not_found(id))?;

        Pet::try_from(row)
    }

    async fn delete_pet(&self, id: i32) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM petlogix WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::pet_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing PostgreSQL connection pool");
        self.pool.close().await;
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Build `UPDATE ... RETURNING` for the fields present in `changes`.
///
/// `Some(None)` binds NULL and clears the column; omitted fields are left out.
fn update_statement(id: i32, changes: PetChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE petlogix SET ");
    let mut set = builder.separated(", ");
    if let Some(name) = changes.name {
        set.push("name = ").push_bind_unseparated(name);
    }
    if let Some(owner) = changes.owner {
        set.push("owner = ").push_bind_unseparated(owner);
    }
    if let Some(address) = changes.address {
        set.push("address = ").push_bind_unseparated(address);
    }
    if let Some(contact) = changes.contact {
        set.push("contact = ").push_bind_unseparated(contact);
    }
    if let Some(species) = changes.species {
        set.push("species = ").push_bind_unseparated(species);
    }
    if let Some(breed) = changes.breed {
        set.push("breed = ").push_bind_unseparated(breed);
    }
    if let Some(age) = changes.age {
        set.push("age = ").push_bind_unseparated(age);
    }
    if let Some(weight) = changes.weight {
        set.push("weight = ").push_bind_unseparated(weight);
    }
    if let Some(status) = changes.status {
        set.push("status = ")
            .push_bind_unseparated(status.as_str().to_string());
    }
    if let Some(price) = changes.price {
        set.push("price = ").push_bind_unseparated(price);
    }
    if let Some(image_url) = changes.image_url {
        set.push("image_url = ").push_bind_unseparated(image_url);
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(PET_COLUMNS);
    builder
}
