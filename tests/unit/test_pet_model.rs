//! Unit tests for the Pet model, its request payloads and status enum

use chrono::Utc;
use petlogix_api::models::{NewPet, Pet, PetChanges, PetStats, PetStatus};
use petlogix_api::routes::pets::{CreatePetRequest, DeletePetRequest, UpdatePetRequest};
use serde_json::json;

fn sample_pet() -> Pet {
    let mut pet = NewPet::new("Buddy", "Mark");
    pet.species = Some("Dog".to_string());
    pet.breed = Some("Labrador".to_string());
    pet.age = Some(3);
    pet.price = Some(250.0);
    pet.into_pet(7, Utc::now())
}

#[test]
fn test_status_parsing() {
    assert_eq!("available".parse::<PetStatus>().unwrap(), PetStatus::Available);
    assert_eq!(" Sold ".parse::<PetStatus>().unwrap(), PetStatus::Sold);
    assert_eq!("RESERVED".parse::<PetStatus>().unwrap(), PetStatus::Reserved);
    assert!("lost".parse::<PetStatus>().is_err());
    assert_eq!(PetStatus::default(), PetStatus::Available);
    assert_eq!(PetStatus::Reserved.to_string(), "reserved");
}

#[test]
fn test_pet_serializes_camel_case() {
    let mut pet = sample_pet();
    pet.image_url = Some("/uploads/image-1.png".to_string());

    let value = serde_json::to_value(&pet).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["imageUrl"], "/uploads/image-1.png");
    assert_eq!(value["status"], "available");
    assert!(value.get("createdAt").is_some());
    assert!(value.get("image_url").is_none());
}

#[test]
fn test_create_request_accepts_numbers_and_strings() {
    let request: CreatePetRequest = serde_json::from_value(json!({
        "name": "Hammy",
        "owner": "Tess",
        "age": "2",
        "weight": 0.1,
        "price": " 12.5 "
    }))
    .unwrap();

    assert_eq!(request.age, Some(2));
    assert_eq!(request.weight, Some(0.1));
    assert_eq!(request.price, Some(12.5));
}

#[test]
fn test_create_request_blank_numbers_are_none() {
    let request: CreatePetRequest = serde_json::from_value(json!({
        "name": "Hammy",
        "owner": "Tess",
        "age": "",
        "weight": null
    }))
    .unwrap();

    assert_eq!(request.age, None);
    assert_eq!(request.weight, None);
    assert_eq!(request.price, None);
}

#[test]
fn test_create_request_rejects_non_numeric_text() {
    let result: Result<CreatePetRequest, _> =
        serde_json::from_value(json!({"name": "A", "owner": "B", "age": "three"}));
    assert!(result.is_err());
}

#[test]
fn test_update_request_distinguishes_omitted_and_null() {
    let request: UpdatePetRequest = serde_json::from_value(json!({
        "id": 5,
        "breed": null,
        "contact": "555-0101",
        "weight": ""
    }))
    .unwrap();

    assert_eq!(request.id, Some(5));
    assert_eq!(request.breed, Some(None));
    assert_eq!(request.contact, Some(Some("555-0101".to_string())));
    assert_eq!(request.weight, Some(None));
    assert_eq!(request.address, None);
    assert_eq!(request.price, None);
    assert_eq!(request.image_url, None);
}

#[test]
fn test_id_accepts_number_or_string() {
    let request: DeletePetRequest = serde_json::from_value(json!({"id": "12"})).unwrap();
    assert_eq!(request.id, Some(12));

    let request: DeletePetRequest = serde_json::from_value(json!({"id": 0})).unwrap();
    assert_eq!(request.id, None);

    let request: DeletePetRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(request.id, None);

    let result: Result<DeletePetRequest, _> =
        serde_json::from_value(json!({"id": 99_999_999_999_i64}));
    assert!(result.is_err());
}

#[test]
fn test_changes_apply_only_provided_fields() {
    let original = sample_pet();
    let mut pet = original.clone();

    PetChanges {
        status: Some(PetStatus::Sold),
        breed: Some(None),
        ..Default::default()
    }
    .apply_to(&mut pet);

    assert_eq!(pet.status, PetStatus::Sold);
    assert_eq!(pet.breed, None);
    assert_eq!(pet.name, original.name);
    assert_eq!(pet.species, original.species);
    assert_eq!(pet.age, original.age);
    assert_eq!(pet.price, original.price);
    assert_eq!(pet.created_at, original.created_at);
}

#[test]
fn test_empty_changes() {
    assert!(PetChanges::default().is_empty());
    let changes = PetChanges {
        address: Some(None),
        ..Default::default()
    };
    assert!(!changes.is_empty());
}

#[test]
fn test_stats_from_pets() {
    let mut sold = sample_pet();
    sold.status = PetStatus::Sold;
    let pets = vec![sample_pet(), sold.clone(), sold];

    let stats = PetStats::from_pets(&pets);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.available, 1);
    assert_eq!(stats.reserved, 0);
    assert_eq!(stats.sold, 2);
    assert_eq!(PetStats::from_pets(&[]), PetStats::default());
}
