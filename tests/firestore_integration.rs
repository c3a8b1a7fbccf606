// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to be set; otherwise they are skipped.
//!
//! The emulator provides a clean state for each test run.

use chrono::NaiveDate;
use fuel_tracker::db::{new_id, FirestoreDb, FuelStore};
use fuel_tracker::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

mod common;
use common::test_db;

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    format!("test-{}", uuid::Uuid::new_v4())
}

fn vehicle_draft(name: &str) -> VehicleDraft {
    VehicleDraft {
        name: name.to_string(),
        make: Some("Volvo".to_string()),
        model: None,
        year: Some(2019),
        fuel_type: Some("petrol".to_string()),
    }
}

fn entry_draft(vehicle_id: &str, date: &str, odometer: i64, brand: &str) -> FuelEntryDraft {
    FuelEntryDraft {
        vehicle_id: vehicle_id.to_string(),
        entry_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        odometer,
        station: "Main St".to_string(),
        brand: brand.to_string(),
        grade: "95".to_string(),
        liters: 40.0,
        total: 60.0,
        notes: None,
    }
}

async fn add_vehicle(db: &FirestoreDb, user_id: &str, name: &str) -> Vehicle {
    let vehicle = Vehicle::from_draft(new_id(), user_id, vehicle_draft(name), chrono::Utc::now());
    db.create_vehicle(&vehicle).await.unwrap();
    vehicle
}

async fn add_entry(db: &FirestoreDb, user_id: &str, draft: FuelEntryDraft) -> FuelEntry {
    let entry = FuelEntry::from_draft(new_id(), user_id, draft, chrono::Utc::now());
    db.create_entry(&entry).await.unwrap();
    entry
}

// ═══════════════════════════════════════════════════════════════════════════
// PROFILE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_profile_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    assert!(db.get_profile(&user_id).await.unwrap().is_none());

    let profile = Profile::new_default(&user_id, Some("a@example.com".to_string()), chrono::Utc::now());
    db.upsert_profile(&profile).await.unwrap();

    let stored = db.get_profile(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.currency, "EUR");
}

// ═══════════════════════════════════════════════════════════════════════════
// ENTRY TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_entry_lifecycle_and_filters() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let car = add_vehicle(&db, &user_id, "Car").await;

    let first = add_entry(&db, &user_id, entry_draft(&car.id, "2024-01-01", 1000, "Shell")).await;
    add_entry(&db, &user_id, entry_draft(&car.id, "2024-01-10", 1400, "BP")).await;

    // Writing the same record again leaves a single document.
    db.create_entry(&first).await.unwrap();

    let all = db
        .fetch_entries(&user_id, &EntryFilter::for_vehicle(Some(car.id.clone())))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let shell_only = EntryFilter {
        brand: Some("Shell".to_string()),
        ..Default::default()
    };
    let filtered = db.fetch_entries(&user_id, &shell_only).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, first.id);

    let updated = db
        .update_entry(&user_id, &first.id, &entry_draft(&car.id, "2024-01-01", 1001, "Shell"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.odometer, 1001);

    // Another user sees nothing.
    assert!(db.get_entry("someone-else", &first.id).await.unwrap().is_none());

    db.delete_entry(&user_id, &first.id).await.unwrap();
    db.delete_entry(&user_id, &first.id).await.unwrap();
    assert!(db.get_entry(&user_id, &first.id).await.unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// DELETION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_vehicle_cascades() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let car = add_vehicle(&db, &user_id, "Car").await;
    add_entry(&db, &user_id, entry_draft(&car.id, "2024-01-01", 1000, "Shell")).await;

    assert_eq!(db.delete_vehicle(&user_id, &car.id).await.unwrap(), 2);
    assert!(db
        .fetch_entries(&user_id, &EntryFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_user_data() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    db.upsert_profile(&Profile::new_default(&user_id, None, chrono::Utc::now()))
        .await
        .unwrap();
    let car = add_vehicle(&db, &user_id, "Car").await;
    add_entry(&db, &user_id, entry_draft(&car.id, "2024-01-01", 1000, "Shell")).await;

    let deleted = db.delete_user_data(&user_id).await.unwrap();
    assert_eq!(deleted, 3);

    assert!(db.get_profile(&user_id).await.unwrap().is_none());
    assert!(db.list_vehicles(&user_id).await.unwrap().is_empty());
}
