//! Integration tests for the garden module.
//!
//! Each test runs on a fresh in-memory SQLite DB with migrations applied and
//! a SeaORM-backed repository behind the domain service.

mod common;

use anyhow::Result;
use uuid::Uuid;

use garden::contract::client::GardenApi;
use garden::contract::error::GardenError;
use garden::contract::model::{Health, NewGardenEntry};
use garden::domain::error::DomainError;

use common::{create_test_module, create_test_service, identity};

fn new_entry(user_id: &str, common_name: &str, water_frequency: Option<i32>) -> NewGardenEntry {
    NewGardenEntry {
        user_id: user_id.to_string(),
        common_name: common_name.to_string(),
        water_frequency,
    }
}

#[tokio::test]
async fn test_garden_lifecycle() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;

    let added = service.add_to_garden(new_entry("u1", "fern", Some(2))).await?;
    assert_eq!(added.common_name, "fern");
    assert_eq!(added.water_frequency, 2);
    assert_eq!(added.watered_count, 0);
    assert_eq!(added.health, Health::Poor);
    assert!(added.last_watered_at.is_none());

    let plants = service.list_garden("u1").await?;
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0].entry_id, added.entry_id);
    assert_eq!(plants[0].plant_id, added.plant_id);

    let watered = service.water("u1", added.entry_id).await?;
    assert_eq!(watered.watered_count, 1);
    assert_eq!(watered.health, Health::Good);
    assert!(watered.last_watered_at.is_some());

    service.remove_entry("u1", added.entry_id).await?;
    assert!(service.list_garden("u1").await?.is_empty());

    // the species survives removal of its last entry
    let again = service.register_species("fern", None).await?;
    assert_eq!(again.plant_id, added.plant_id);
    Ok(())
}

#[tokio::test]
async fn test_first_registration_wins() -> Result<()> {
    let service = create_test_service().await;

    let first = service.register_species("monstera", Some(7)).await?;
    let second = service.register_species("monstera", Some(3)).await?;
    let third = service.register_species("  monstera  ", None).await?;

    assert_eq!(first.plant_id, second.plant_id);
    assert_eq!(first.plant_id, third.plant_id);
    assert_eq!(second.water_frequency, 7);
    assert_eq!(third.common_name, "monstera");
    Ok(())
}

#[tokio::test]
async fn test_default_water_frequency_from_config() -> Result<()> {
    let service = create_test_service().await;
    let species = service.register_species("cactus", None).await?;
    assert_eq!(species.water_frequency, 2);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_registration_yields_one_species() -> Result<()> {
    let service = create_test_service().await;

    let (a, b, c) = tokio::join!(
        service.register_species("basil", Some(1)),
        service.register_species("basil", Some(2)),
        service.register_species("basil", Some(3)),
    );
    let (a, b, c) = (a?, b?, c?);

    assert_eq!(a.plant_id, b.plant_id);
    assert_eq!(b.plant_id, c.plant_id);
    assert_eq!(a.water_frequency, b.water_frequency);
    Ok(())
}

#[tokio::test]
async fn test_bootstrap_is_idempotent_and_refreshes_profile() -> Result<()> {
    let service = create_test_service().await;

    let first = service.bootstrap_user(identity("u1")).await?;
    assert!(!first.paid);

    let mut renamed = identity("u1");
    renamed.name = "New Name".to_string();
    renamed.email = "new@example.com".to_string();
    let second = service.bootstrap_user(renamed).await?;

    assert_eq!(second.user_id, first.user_id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.name, "New Name");
    assert_eq!(second.email, "new@example.com");

    let stored = service.get_user("u1").await?;
    assert_eq!(stored, second);
    Ok(())
}

#[tokio::test]
async fn test_login_goes_through_verifier() -> Result<()> {
    let service = create_test_service().await;

    let user = service.login("valid:abc").await?;
    assert_eq!(user.user_id, "abc");

    let err = service.login("forged").await.unwrap_err();
    assert!(matches!(err, DomainError::Authentication { .. }));

    let err = service.login("  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    Ok(())
}

#[tokio::test]
async fn test_watering_many_times_counts_every_watering() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    let entry = service.add_to_garden(new_entry("u1", "rose", Some(3))).await?;

    let mut last = None;
    for n in 1..=5 {
        let plant = service.water("u1", entry.entry_id).await?;
        assert_eq!(plant.watered_count, n);
        assert_eq!(plant.health, Health::Good);
        last = Some(plant);
    }

    let listed = service.list_garden("u1").await?;
    assert_eq!(listed[0].watered_count, 5);
    assert_eq!(listed[0].health, Health::Good);
    assert_eq!(listed[0].last_watered_at, last.and_then(|p| p.last_watered_at));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_waterings_each_see_their_own_count() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    let entry = service.add_to_garden(new_entry("u1", "mint", Some(2))).await?;

    let (a, b, c) = tokio::join!(
        service.water("u1", entry.entry_id),
        service.water("u1", entry.entry_id),
        service.water("u1", entry.entry_id),
    );
    let mut counts = vec![a?.watered_count, b?.watered_count, c?.watered_count];
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2, 3]);

    let listed = service.list_garden("u1").await?;
    assert_eq!(listed[0].watered_count, 3);
    assert_eq!(listed[0].health, Health::Good);
    Ok(())
}

#[tokio::test]
async fn test_watering_is_scoped_to_owner() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    service.bootstrap_user(identity("u2")).await?;
    let entry = service.add_to_garden(new_entry("u1", "fern", None)).await?;

    let err = service.water("u2", entry.entry_id).await.unwrap_err();
    assert!(matches!(err, DomainError::EntryNotFound { .. }));

    let listed = service.list_garden("u1").await?;
    assert_eq!(listed[0].watered_count, 0);
    assert_eq!(listed[0].health, Health::Poor);
    Ok(())
}

#[tokio::test]
async fn test_removing_missing_rows_reports_not_found() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    let entry = service.add_to_garden(new_entry("u1", "fern", None)).await?;

    let err = service.remove_entry("u1", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::EntryNotFound { .. }));

    let err = service
        .remove_species_from_garden("u1", Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PlantNotInGarden { .. }));

    let err = service.water("u1", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::EntryNotFound { .. }));

    assert_eq!(service.list_garden("u1").await?[0].entry_id, entry.entry_id);
    Ok(())
}

#[tokio::test]
async fn test_species_removal_leaves_other_users_alone() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    service.bootstrap_user(identity("u2")).await?;

    let a = service.add_to_garden(new_entry("u1", "tulip", None)).await?;
    service.add_to_garden(new_entry("u1", "tulip", None)).await?;
    service.add_to_garden(new_entry("u1", "ivy", None)).await?;
    service.add_to_garden(new_entry("u2", "tulip", None)).await?;

    let removed = service.remove_species_from_garden("u1", a.plant_id).await?;
    assert_eq!(removed, 2);

    let u1 = service.list_garden("u1").await?;
    assert_eq!(u1.len(), 1);
    assert_eq!(u1[0].common_name, "ivy");

    let u2 = service.list_garden("u2").await?;
    assert_eq!(u2.len(), 1);
    assert_eq!(u2[0].plant_id, a.plant_id);
    Ok(())
}

#[tokio::test]
async fn test_entry_removal_removes_only_that_entry() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;
    let first = service.add_to_garden(new_entry("u1", "fern", None)).await?;
    let second = service.add_to_garden(new_entry("u1", "fern", None)).await?;
    assert_eq!(first.plant_id, second.plant_id);

    service.remove_entry("u1", first.entry_id).await?;

    let left = service.list_garden("u1").await?;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].entry_id, second.entry_id);
    Ok(())
}

#[tokio::test]
async fn test_add_validation() -> Result<()> {
    let service = create_test_service().await;
    service.bootstrap_user(identity("u1")).await?;

    let err = service
        .add_to_garden(new_entry("", "fern", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "userId"));

    let err = service
        .add_to_garden(new_entry("u1", "   ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "commonName"));

    let err = service
        .add_to_garden(new_entry("u1", "fern", Some(0)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "waterFrequency"));

    let err = service
        .add_to_garden(new_entry("u1", "fern", Some(366)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let long_name = "x".repeat(101);
    let err = service
        .add_to_garden(new_entry("u1", &long_name, None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = service
        .add_to_garden(new_entry("ghost", "fern", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { .. }));

    assert!(service.list_garden("u1").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_local_client_maps_errors() -> Result<()> {
    let module = create_test_module().await;
    let client = module.client();

    client.bootstrap_user(identity("u1")).await?;
    let plant = client.add_to_garden(new_entry("u1", "aloe", Some(14))).await?;
    let watered = client.water("u1", plant.entry_id).await?;
    assert_eq!(watered.health, Health::Good);

    let err = client.get_user("nobody").await.unwrap_err();
    assert!(matches!(err, GardenError::NotFound { .. }));

    let err = client.list_garden("").await.unwrap_err();
    assert!(matches!(err, GardenError::Validation { .. }));

    assert_eq!(
        client
            .remove_species_from_garden("u1", plant.plant_id)
            .await?,
        1
    );
    let err = client.remove_entry("u1", plant.entry_id).await.unwrap_err();
    assert!(matches!(err, GardenError::NotFound { .. }));
    Ok(())
}
