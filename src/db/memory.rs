// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for local development and tests.
//!
//! State lives in the process and is lost on restart. Clones share the same
//! maps.

use dashmap::DashMap;
use std::sync::Arc;

use super::FuelStore;
use crate::error::AppError;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

#[derive(Clone, Default)]
pub struct MemoryDb {
    /// Keyed by user ID
    profiles: Arc<DashMap<String, Profile>>,
    /// Keyed by vehicle ID
    vehicles: Arc<DashMap<String, Vehicle>>,
    /// Keyed by entry ID
    entries: Arc<DashMap<String, FuelEntry>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_entries_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&FuelEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !predicate(entry));
        before - self.entries.len()
    }
}

impl FuelStore for MemoryDb {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.get(user_id).map(|p| p.value().clone()))
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn list_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.value().clone())
            .collect();
        vehicles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }

    async fn get_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        Ok(self
            .vehicles
            .get(vehicle_id)
            .filter(|v| v.user_id == user_id)
            .map(|v| v.value().clone()))
    }

    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(())
    }

    async fn update_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
        draft: &VehicleDraft,
    ) -> Result<Option<Vehicle>, AppError> {
        let Some(mut vehicle) = self
            .vehicles
            .get_mut(vehicle_id)
            .filter(|v| v.user_id == user_id)
        else {
            return Ok(None);
        };
        vehicle.apply_draft(draft.clone(), chrono::Utc::now());
        Ok(Some(vehicle.clone()))
    }

    async fn delete_vehicle(&self, user_id: &str, vehicle_id: &str) -> Result<usize, AppError> {
        let removed = self
            .vehicles
            .remove_if(vehicle_id, |_, v| v.user_id == user_id)
            .is_some();
        if !removed {
            return Ok(0);
        }

        let entries =
            self.remove_entries_where(|e| e.user_id == user_id && e.vehicle_id == vehicle_id);
        Ok(entries + 1)
    }

    async fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> Result<Vec<FuelEntry>, AppError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id && filter.matches(e.value()))
            .map(|e| e.value().clone())
            .collect())
    }

    async fn get_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<FuelEntry>, AppError> {
        Ok(self
            .entries
            .get(entry_id)
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone()))
    }

    async fn create_entry(&self, entry: &FuelEntry) -> Result<(), AppError> {
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        draft: &FuelEntryDraft,
    ) -> Result<Option<FuelEntry>, AppError> {
        let Some(mut entry) = self
            .entries
            .get_mut(entry_id)
            .filter(|e| e.user_id == user_id)
        else {
            return Ok(None);
        };
        entry.apply_draft(draft.clone(), chrono::Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<(), AppError> {
        self.entries
            .remove_if(entry_id, |_, e| e.user_id == user_id);
        Ok(())
    }

    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let entries = self.remove_entries_where(|e| e.user_id == user_id);

        let before = self.vehicles.len();
        self.vehicles.retain(|_, v| v.user_id != user_id);
        let vehicles = before - self.vehicles.len();

        let profile = usize::from(self.profiles.remove(user_id).is_some());

        tracing::info!(user_id, entries, vehicles, "User data deletion complete");
        Ok(entries + vehicles + profile)
    }
}
