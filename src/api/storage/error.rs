//! Storage error types for the API storage backends.

use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}

impl StorageError {
    pub fn pet_not_found(id: i32) -> Self {
        StorageError::NotFound {
            entity_type: "pet".to_string(),
            entity_id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StorageError::ConnectionError(err.to_string()),
            other => StorageError::Other(other.to_string()),
        }
    }
}
