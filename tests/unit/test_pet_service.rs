//! Unit tests for pet service validation and error mapping

use petlogix_api::models::{NewPet, PetChanges, PetStatus};
use petlogix_api::services::pet_service::{MISSING_ID, MISSING_REQUIRED_FIELDS};
use petlogix_api::services::{FilterService, PetService, PetServiceError};
use petlogix_api::storage::MemoryStorageBackend;
use std::sync::Arc;

fn service() -> PetService {
    PetService::new(Arc::new(MemoryStorageBackend::new()))
}

fn validation_message(err: PetServiceError) -> String {
    match err {
        PetServiceError::Validation(message) => message,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_requires_name_and_owner() {
    let service = service();

    for (name, owner) in [("", "Mark"), ("Buddy", ""), ("", ""), (" ", "\t")] {
        let err = service
            .create_pet(NewPet::new(name, owner))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), MISSING_REQUIRED_FIELDS);
    }

    let pets = service.list_pets(&FilterService::new()).await.unwrap();
    assert!(pets.is_empty());
}

#[tokio::test]
async fn test_create_rejects_negative_measurements() {
    let service = service();

    let mut pet = NewPet::new("Buddy", "Mark");
    pet.age = Some(-1);
    assert!(matches!(
        service.create_pet(pet).await,
        Err(PetServiceError::Validation(_))
    ));

    let mut pet = NewPet::new("Buddy", "Mark");
    pet.price = Some(-0.01);
    assert!(service.create_pet(pet).await.is_err());

    let mut pet = NewPet::new("Buddy", "Mark");
    pet.weight = Some(f64::NAN);
    assert!(service.create_pet(pet).await.is_err());

    let mut pet = NewPet::new("Buddy", "Mark");
    pet.age = Some(0);
    pet.price = Some(0.0);
    assert!(service.create_pet(pet).await.is_ok());
}

#[tokio::test]
async fn test_missing_id_is_validation_error() {
    let service = service();

    let err = service
        .update_pet(None, PetChanges::default())
        .await
        .unwrap_err();
    assert_eq!(validation_message(err), MISSING_ID);

    let err = service.delete_pet(None).await.unwrap_err();
    assert_eq!(validation_message(err), MISSING_ID);

    let err = service.get_pet(None).await.unwrap_err();
    assert_eq!(validation_message(err), MISSING_ID);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let service = service();

    assert!(matches!(
        service.update_pet(Some(999_999), PetChanges::default()).await,
        Err(PetServiceError::NotFound(id)) if id == "999999"
    ));
    assert!(matches!(
        service.delete_pet(Some(999_999)).await,
        Err(PetServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.get_pet(Some(999_999)).await,
        Err(PetServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_cannot_blank_required_fields() {
    let service = service();
    let pet = service.create_pet(NewPet::new("Rex", "Sam")).await.unwrap();

    let changes = PetChanges {
        owner: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.update_pet(Some(pet.id), changes).await,
        Err(PetServiceError::Validation(_))
    ));

    let unchanged = service.get_pet(Some(pet.id)).await.unwrap();
    assert_eq!(unchanged.owner, "Sam");
}

#[tokio::test]
async fn test_update_and_stats() {
    let service = service();
    let pet = service.create_pet(NewPet::new("Rex", "Sam")).await.unwrap();
    service.create_pet(NewPet::new("Kiwi", "Ola")).await.unwrap();

    let changes = PetChanges {
        status: Some(PetStatus::Sold),
        ..Default::default()
    };
    let updated = service.update_pet(Some(pet.id), changes).await.unwrap();
    assert_eq!(updated.status, PetStatus::Sold);

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.sold, 1);
    assert_eq!(stats.available, 1);
}
