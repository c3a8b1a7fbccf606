// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`FuelStore`] is the data-access contract the API is written against.
//! Backends: Firestore for deployments, an in-memory map for local runs and
//! tests. [`RetryingStore`] wraps either with backoff and timeouts.

pub mod backend;
pub mod firestore;
pub mod memory;
pub mod retry;

use std::future::Future;

use crate::error::AppError;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

pub use backend::Backend;
pub use firestore::FirestoreDb;
pub use memory::MemoryDb;
pub use retry::RetryingStore;

/// The store used by the running service.
pub type Database = RetryingStore<Backend>;

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    pub const VEHICLES: &str = "vehicles";
    pub const FUEL_ENTRIES: &str = "fuel_entries";
}

/// Per-user persistence for profiles, vehicles and fill-ups.
///
/// Every operation is scoped to `user_id`; records owned by other users are
/// invisible. Entry listings are unordered.
pub trait FuelStore: Send + Sync {
    // ─── Profiles ────────────────────────────────────────────────

    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, AppError>> + Send;

    fn upsert_profile(&self, profile: &Profile)
        -> impl Future<Output = Result<(), AppError>> + Send;

    // ─── Vehicles ────────────────────────────────────────────────

    fn list_vehicles(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Vehicle>, AppError>> + Send;

    fn get_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> impl Future<Output = Result<Option<Vehicle>, AppError>> + Send;

    /// Store a new vehicle under its own ID. Writing the same record again
    /// overwrites it, so a repeated call never adds a second vehicle.
    fn create_vehicle(
        &self,
        vehicle: &Vehicle,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Returns `None` when the vehicle does not exist for this user.
    fn update_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
        draft: &VehicleDraft,
    ) -> impl Future<Output = Result<Option<Vehicle>, AppError>> + Send;

    /// Delete a vehicle and its fill-ups. Returns the number of records removed.
    fn delete_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> impl Future<Output = Result<usize, AppError>> + Send;

    // ─── Fuel Entries ────────────────────────────────────────────

    fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> impl Future<Output = Result<Vec<FuelEntry>, AppError>> + Send;

    fn get_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> impl Future<Output = Result<Option<FuelEntry>, AppError>> + Send;

    /// Store a new fill-up under its own ID. Writing the same record again
    /// overwrites it, so a repeated call never duplicates the fill-up.
    fn create_entry(
        &self,
        entry: &FuelEntry,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Returns `None` when the entry does not exist for this user.
    fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        draft: &FuelEntryDraft,
    ) -> impl Future<Output = Result<Option<FuelEntry>, AppError>> + Send;

    /// Idempotent: deleting a missing entry succeeds.
    fn delete_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    // ─── Account ─────────────────────────────────────────────────

    /// Delete everything the user owns. Returns the number of records removed.
    fn delete_user_data(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<usize, AppError>> + Send;
}

/// Fresh opaque record ID.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
