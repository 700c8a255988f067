//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PetLogix API",
        description = "Pet inventory CRUD service"
    ),
    paths(
        crate::routes::health_check,
        crate::routes::pets::list_pets,
        crate::routes::pets::get_pet,
        crate::routes::pets::get_pet_stats,
        crate::routes::pets::create_pet,
        crate::routes::pets::update_pet,
        crate::routes::pets::update_pet_by_id,
        crate::routes::pets::delete_pet,
        crate::routes::pets::delete_pet_by_id,
    ),
    components(schemas(
        crate::models::Pet,
        crate::models::PetStatus,
        crate::models::PetStats,
        crate::routes::pets::CreatePetRequest,
        crate::routes::pets::UpdatePetRequest,
        crate::routes::pets::DeletePetRequest,
        crate::routes::pets::PetListResponse,
        crate::routes::pets::PetResponse,
        crate::routes::pets::PetStatsResponse,
        crate::routes::pets::MessageResponse,
        crate::routes::error::ErrorResponse,
        crate::routes::HealthResponse,
    )),
    tags(
        (name = "Pets", description = "Pet inventory records"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
