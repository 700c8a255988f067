//! Application state management.
//!
//! Defines the AppState struct that holds the pet service (and through it the
//! storage backend) plus the runtime configuration.

use crate::config::ApiConfig;
use crate::services::PetService;
use crate::storage::{
    MemoryStorageBackend, PostgresStorageBackend, StorageBackend, StorageError,
};
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pet service wrapping the storage backend
    pub pet_service: PetService,
    /// Runtime configuration
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Create application state on top of an existing storage backend.
    pub fn new(storage: Arc<dyn StorageBackend>, config: ApiConfig) -> Self {
        Self {
            pet_service: PetService::new(storage),
            config: Arc::new(config),
        }
    }

    /// Create application state backed by the in-memory store.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(Arc::new(MemoryStorageBackend::new()), config)
    }

    /// Initialize storage from configuration.
    ///
    /// Connects to PostgreSQL and runs migrations if a database URL is set,
    /// otherwise falls back to the in-memory store.
    pub async fn from_config(config: ApiConfig) -> Result<Self, StorageError> {
        match config.database_url.clone() {
            Some(database_url) => {
                let backend =
                    PostgresStorageBackend::connect(&database_url, config.db_max_connections)
                        .await?;
                info!("Using PostgreSQL storage");
                Ok(Self::new(Arc::new(backend), config))
            }
            None => {
                warn!("DATABASE_URL not set; pets are kept in memory and lost on restart");
                Ok(Self::in_memory(config))
            }
        }
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        self.pet_service.storage()
    }

    pub fn expose_error_details(&self) -> bool {
        self.config.expose_error_details
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(ApiConfig::default())
    }
}

// Allow PetService to be extracted directly (for Axum)
impl FromRef<AppState> for PetService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pet_service.clone()
    }
}
