// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store selected at startup from configuration.

use super::{FirestoreDb, FuelStore, MemoryDb};
use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

#[derive(Clone)]
pub enum Backend {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Backend {
    /// Connect to the store named by `config.storage_backend`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Ok(Backend::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Backend::Memory(MemoryDb::new()))
            }
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match $self {
            Backend::Firestore(db) => db.$method($($arg),*).await,
            Backend::Memory(db) => db.$method($($arg),*).await,
        }
    };
}

impl FuelStore for Backend {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        dispatch!(self, get_profile(user_id))
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        dispatch!(self, upsert_profile(profile))
    }

    async fn list_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>, AppError> {
        dispatch!(self, list_vehicles(user_id))
    }

    async fn get_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        dispatch!(self, get_vehicle(user_id, vehicle_id))
    }

    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        dispatch!(self, create_vehicle(vehicle))
    }

    async fn update_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
        draft: &VehicleDraft,
    ) -> Result<Option<Vehicle>, AppError> {
        dispatch!(self, update_vehicle(user_id, vehicle_id, draft))
    }

    async fn delete_vehicle(&self, user_id: &str, vehicle_id: &str) -> Result<usize, AppError> {
        dispatch!(self, delete_vehicle(user_id, vehicle_id))
    }

    async fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> Result<Vec<FuelEntry>, AppError> {
        dispatch!(self, fetch_entries(user_id, filter))
    }

    async fn get_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<FuelEntry>, AppError> {
        dispatch!(self, get_entry(user_id, entry_id))
    }

    async fn create_entry(&self, entry: &FuelEntry) -> Result<(), AppError> {
        dispatch!(self, create_entry(entry))
    }

    async fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        draft: &FuelEntryDraft,
    ) -> Result<Option<FuelEntry>, AppError> {
        dispatch!(self, update_entry(user_id, entry_id, draft))
    }

    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<(), AppError> {
        dispatch!(self, delete_entry(user_id, entry_id))
    }

    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        dispatch!(self, delete_user_data(user_id))
    }
}
