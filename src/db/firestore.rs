// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Collections:
//! - `profiles` (keyed by user ID)
//! - `vehicles` (keyed by vehicle ID, `user_id` field for ownership)
//! - `fuel_entries` (keyed by entry ID, `user_id` and `vehicle_id` fields)

use firestore::errors::FirestoreError;

use super::{collections, FuelStore};
use crate::error::AppError;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Network failures and retryable server errors are transient; everything
/// else is reported as a plain database error.
fn store_error(err: FirestoreError) -> AppError {
    match err {
        FirestoreError::NetworkError(e) => AppError::Unavailable(e.to_string()),
        FirestoreError::DatabaseError(e) if e.retry_possible => {
            AppError::Unavailable(e.to_string())
        }
        other => AppError::Database(other.to_string()),
    }
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client. Every operation returns an error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    async fn put<T>(&self, collection: &str, doc_id: &str, object: &T) -> Result<(), AppError>
    where
        T: serde::Serialize + for<'de> serde::Deserialize<'de> + Sync + Send,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .object(object)
            .execute()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn remove(&self, collection: &str, doc_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(doc_id)
            .execute()
            .await
            .map_err(store_error)
    }

    /// Entries owned by `user_id`, narrowed to one vehicle when given.
    async fn query_entries(
        &self,
        user_id: &str,
        vehicle_id: Option<&str>,
    ) -> Result<Vec<FuelEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FUEL_ENTRIES)
            .filter(|q| {
                q.for_all([
                    q.field("user_id").eq(user_id),
                    vehicle_id.and_then(|id| q.field("vehicle_id").eq(id)),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client.begin_transaction().await.map_err(store_error)?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(store_error)?;
        }

        Ok(())
    }
}

impl FuelStore for FirestoreDb {
    // ─── Profiles ────────────────────────────────────────────────

    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(store_error)
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        self.put(collections::PROFILES, &profile.user_id, profile)
            .await
    }

    // ─── Vehicles ────────────────────────────────────────────────

    async fn list_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::VEHICLES)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    async fn get_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle: Option<Vehicle> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::VEHICLES)
            .obj()
            .one(vehicle_id)
            .await
            .map_err(store_error)?;

        Ok(vehicle.filter(|v| v.user_id == user_id))
    }

    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        self.put(collections::VEHICLES, &vehicle.id, vehicle).await
    }

    async fn update_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
        draft: &VehicleDraft,
    ) -> Result<Option<Vehicle>, AppError> {
        let Some(mut vehicle) = self.get_vehicle(user_id, vehicle_id).await? else {
            return Ok(None);
        };

        vehicle.apply_draft(draft.clone(), chrono::Utc::now());
        self.put(collections::VEHICLES, &vehicle.id, &vehicle).await?;
        Ok(Some(vehicle))
    }

    async fn delete_vehicle(&self, user_id: &str, vehicle_id: &str) -> Result<usize, AppError> {
        if self.get_vehicle(user_id, vehicle_id).await?.is_none() {
            return Ok(0);
        }

        let entries = self.query_entries(user_id, Some(vehicle_id)).await?;
        self.batch_delete(&entries, collections::FUEL_ENTRIES, |e: &FuelEntry| {
            e.id.clone()
        })
        .await?;

        self.remove(collections::VEHICLES, vehicle_id).await?;

        tracing::debug!(user_id, vehicle_id, entries = entries.len(), "Deleted vehicle");
        Ok(entries.len() + 1)
    }

    // ─── Fuel Entries ────────────────────────────────────────────

    async fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> Result<Vec<FuelEntry>, AppError> {
        // Only the ownership and vehicle filters go to Firestore; the rest
        // would need composite indexes for every combination.
        let mut entries = self
            .query_entries(user_id, filter.vehicle_id.as_deref())
            .await?;
        entries.retain(|e| filter.matches(e));
        Ok(entries)
    }

    async fn get_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<FuelEntry>, AppError> {
        let entry: Option<FuelEntry> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FUEL_ENTRIES)
            .obj()
            .one(entry_id)
            .await
            .map_err(store_error)?;

        Ok(entry.filter(|e| e.user_id == user_id))
    }

    async fn create_entry(&self, entry: &FuelEntry) -> Result<(), AppError> {
        self.put(collections::FUEL_ENTRIES, &entry.id, entry).await
    }

    async fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        draft: &FuelEntryDraft,
    ) -> Result<Option<FuelEntry>, AppError> {
        let Some(mut entry) = self.get_entry(user_id, entry_id).await? else {
            return Ok(None);
        };

        entry.apply_draft(draft.clone(), chrono::Utc::now());
        self.put(collections::FUEL_ENTRIES, &entry.id, &entry).await?;
        Ok(Some(entry))
    }

    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<(), AppError> {
        if self.get_entry(user_id, entry_id).await?.is_some() {
            self.remove(collections::FUEL_ENTRIES, entry_id).await?;
        }
        Ok(())
    }

    // ─── Account ─────────────────────────────────────────────────

    /// Deletes entries, then vehicles, then the profile.
    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        let entries = self.query_entries(user_id, None).await?;
        self.batch_delete(&entries, collections::FUEL_ENTRIES, |e: &FuelEntry| {
            e.id.clone()
        })
        .await?;
        deleted_count += entries.len();
        tracing::debug!(user_id, count = entries.len(), "Deleted fuel entries");

        let vehicles = self.list_vehicles(user_id).await?;
        self.batch_delete(&vehicles, collections::VEHICLES, |v: &Vehicle| v.id.clone())
            .await?;
        deleted_count += vehicles.len();
        tracing::debug!(user_id, count = vehicles.len(), "Deleted vehicles");

        if self.get_profile(user_id).await?.is_some() {
            self.remove(collections::PROFILES, user_id).await?;
            deleted_count += 1;
            tracing::debug!(user_id, "Deleted profile");
        }

        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
