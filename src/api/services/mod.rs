//! Services module - validation and orchestration between routes and storage.

pub mod filter_service;
pub mod pet_service;

// Re-export for convenience
pub use filter_service::FilterService;
pub use pet_service::{PetService, PetServiceError};
