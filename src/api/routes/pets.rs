//! Pet routes: list, get, stats, create, update and delete.
//!
//! Update and delete accept the id either in the JSON body (`/pets`) or as a
//! path segment (`/pets/{id}`). When both are given the path wins.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

use super::app_state::AppState;
use super::error::{ApiError, ApiJson, ErrorResponse};
use crate::models::{NewPet, Pet, PetChanges, PetStats, PetStatus, de};
use crate::services::{FilterService, PetServiceError};

/// Query parameters for GET /pets
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPetsQuery {
    /// `all` or one of available, reserved, sold
    pub status: Option<String>,
    /// Case-insensitive species match
    pub species: Option<String>,
    /// Case-insensitive substring over name, owner and breed
    pub search: Option<String>,
}

/// Request body for creating a pet. A supplied `id` is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_number")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "de::lenient_number")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<f64>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    /// Stored verbatim, typically a `data:` URI
    pub image_url: Option<String>,
}

/// Request body for updating a pet.
///
/// Omitted fields are left unchanged; `null` clears an optional field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(default, deserialize_with = "de::pet_id")]
    #[schema(value_type = Option<i32>)]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "de::patch_field")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::patch_field")]
    #[schema(value_type = Option<String>)]
    pub contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::patch_field")]
    #[schema(value_type = Option<String>)]
    pub species: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::patch_field")]
    #[schema(value_type = Option<String>)]
    pub breed: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::patch_number")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "de::patch_number")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Option<f64>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::patch_number")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "de::patch_field")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
}

/// Request body for DELETE /pets
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeletePetRequest {
    #[serde(default, deserialize_with = "de::pet_id")]
    #[schema(value_type = Option<i32>)]
    pub id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetListResponse {
    pub success: bool,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub pet: Pet,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetStatsResponse {
    pub success: bool,
    pub stats: PetStats,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub const PET_ADDED: &str = "Pet added successfully";
pub const PET_UPDATED: &str = "Pet updated successfully";
pub const PET_DELETED: &str = "Pet deleted successfully";
pub const PET_NOT_FOUND: &str = "Pet not found";

/// Create the pets router
pub fn pets_router() -> Router<AppState> {
    // In axum 0.8, path parameters use curly braces {} instead of colons :
    Router::new()
        .route(
            "/",
            get(list_pets)
                .post(create_pet)
                .put(update_pet)
                .delete(delete_pet),
        )
        .route("/stats", get(get_pet_stats))
        .route(
            "/{id}",
            get(get_pet).put(update_pet_by_id).delete(delete_pet_by_id),
        )
}

/// GET /pets - List pets, newest first
#[utoipa::path(
    get,
    path = "/api/pets",
    tag = "Pets",
    params(ListPetsQuery),
    responses(
        (status = 200, description = "Pets listed", body = PetListResponse),
        (status = 400, description = "Invalid status filter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<ListPetsQuery>,
) -> Result<Json<PetListResponse>, ApiError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(s.parse::<PetStatus>().map_err(|e| ApiError::bad_request(e.to_string()))?),
    };
    let filter = FilterService::new()
        .with_status(status)
        .with_species(query.species.as_deref())
        .with_search(query.search.as_deref());

    let pets = state
        .pet_service
        .list_pets(&filter)
        .await
        .map_err(|e| service_error(&state, e, "Failed to fetch pets"))?;

    Ok(Json(PetListResponse {
        success: true,
        pets,
    }))
}

/// GET /pets/{id} - Get a single pet
#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    tag = "Pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PetResponse>, ApiError> {
    let id = parse_path_id(&id)?;
    let pet = state
        .pet_service
        .get_pet(id)
        .await
        .map_err(|e| service_error(&state, e, "Failed to fetch pet"))?;

    Ok(Json(PetResponse {
        success: true,
        message: None,
        pet,
    }))
}

/// GET /pets/stats - Inventory counts per status
#[utoipa::path(
    get,
    path = "/api/pets/stats",
    tag = "Pets",
    responses(
        (status = 200, description = "Counts per status", body = PetStatsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_pet_stats(
    State(state): State<AppState>,
) -> Result<Json<PetStatsResponse>, ApiError> {
    let stats = state
        .pet_service
        .stats()
        .await
        .map_err(|e| service_error(&state, e, "Failed to fetch pet stats"))?;

    Ok(Json(PetStatsResponse {
        success: true,
        stats,
    }))
}

/// POST /pets - Create a pet
#[utoipa::path(
    post,
    path = "/api/pets",
    tag = "Pets",
    request_body = CreatePetRequest,
    responses(
        (status = 200, description = "Pet created", body = PetResponse),
        (status = 400, description = "Name or owner missing, or invalid field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_pet(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = NewPet::try_from(request)
        .map_err(|e| service_error(&state, e, "Failed to add pet"))?;
    let pet = state
        .pet_service
        .create_pet(pet)
        .await
        .map_err(|e| service_error(&state, e, "Failed to add pet"))?;

    Ok(Json(PetResponse {
        success: true,
        message: Some(PET_ADDED.to_string()),
        pet,
    }))
}

/// PUT /pets - Update a pet identified by the `id` in the body
#[utoipa::path(
    put,
    path = "/api/pets",
    tag = "Pets",
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Pet id missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_pet(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdatePetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let id = request.id;
    apply_update(&state, id, request).await
}

/// PUT /pets/{id} - Update a pet identified by the path
#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    tag = "Pets",
    params(("id" = i32, Path, description = "Pet id")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Invalid id or field", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_pet_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdatePetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let id = parse_path_id(&id)?;
    apply_update(&state, id, request).await
}

async fn apply_update(
    state: &AppState,
    id: Option<i32>,
    request: UpdatePetRequest,
) -> Result<Json<PetResponse>, ApiError> {
    let changes = PetChanges::try_from(request)
        .map_err(|e| service_error(state, e, "Failed to update pet"))?;
    let pet = state
        .pet_service
        .update_pet(id, changes)
        .await
        .map_err(|e| service_error(state, e, "Failed to update pet"))?;

    Ok(Json(PetResponse {
        success: true,
        message: Some(PET_UPDATED.to_string()),
        pet,
    }))
}

/// DELETE /pets - Delete a pet identified by `{id}` in the body
#[utoipa::path(
    delete,
    path = "/api/pets",
    tag = "Pets",
    request_body = DeletePetRequest,
    responses(
        (status = 200, description = "Pet deleted", body = MessageResponse),
        (status = 400, description = "Pet id missing", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    // An empty or `null` body is a missing id, not a malformed request
    let request: DeletePetRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DeletePetRequest::default()
    } else {
        serde_json::from_slice::<Option<DeletePetRequest>>(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?
            .unwrap_or_default()
    };
    remove_pet(&state, request.id).await
}

/// DELETE /pets/{id} - Delete a pet identified by the path
#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    tag = "Pets",
    params(("id" = i32, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Pet not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_pet_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_path_id(&id)?;
    remove_pet(&state, id).await
}

async fn remove_pet(state: &AppState, id: Option<i32>) -> Result<Json<MessageResponse>, ApiError> {
    state
        .pet_service
        .delete_pet(id)
        .await
        .map_err(|e| service_error(state, e, "Failed to delete pet"))?;

    Ok(Json(MessageResponse {
        success: true,
        message: PET_DELETED.to_string(),
    }))
}

impl TryFrom<CreatePetRequest> for NewPet {
    type Error = PetServiceError;

    fn try_from(request: CreatePetRequest) -> Result<Self, Self::Error> {
        Ok(NewPet {
            name: request.name.unwrap_or_default(),
            owner: request.owner.unwrap_or_default(),
            address: request.address,
            contact: request.contact,
            species: request.species,
            breed: request.breed,
            age: request.age,
            weight: request.weight,
            status: parse_status(request.status)?.unwrap_or_default(),
            price: request.price,
            image_url: request.image_url,
        })
    }
}

impl TryFrom<UpdatePetRequest> for PetChanges {
    type Error = PetServiceError;

    fn try_from(request: UpdatePetRequest) -> Result<Self, Self::Error> {
        Ok(PetChanges {
            name: request.name,
            owner: request.owner,
            address: request.address,
            contact: request.contact,
            species: request.species,
            breed: request.breed,
            age: request.age,
            weight: request.weight,
            status: parse_status(request.status)?,
            price: request.price,
            image_url: request.image_url,
        })
    }
}

/// Blank status means "not provided".
fn parse_status(status: Option<String>) -> Result<Option<PetStatus>, PetServiceError> {
    match status.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: crate::models::enums::UnknownStatus| {
                PetServiceError::Validation(e.to_string())
            }),
    }
}

/// Parse an id path segment. `0` is treated as a missing id.
fn parse_path_id(raw: &str) -> Result<Option<i32>, ApiError> {
    let id: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid pet ID: {}", raw)))?;
    Ok((id != 0).then_some(id))
}

/// Map a service error onto the HTTP taxonomy.
fn service_error(state: &AppState, err: PetServiceError, failure: &str) -> ApiError {
    match err {
        PetServiceError::Validation(message) => {
            warn!("{}: {}", failure, message);
            ApiError::bad_request(message)
        }
        PetServiceError::NotFound(id) => {
            warn!("{}: pet {} not found", failure, id);
            ApiError::not_found(PET_NOT_FOUND)
        }
        PetServiceError::Storage(e) => {
            error!("{}: {}", failure, e);
            let api_error = ApiError::internal(failure);
            if state.expose_error_details() {
                api_error.with_error(e.to_string())
            } else {
                api_error
            }
        }
    }
}
