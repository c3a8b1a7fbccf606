// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Retry with exponential backoff around store calls.
//!
//! Each attempt is bounded by the policy's timeout. Only transient failures
//! (see [`AppError::is_transient`]) are retried; the last error is returned
//! once attempts run out.

use std::future::Future;

use super::FuelStore;
use crate::config::RetryPolicy;
use crate::error::AppError;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile, Vehicle, VehicleDraft};

/// Run `op` until it succeeds, fails permanently, or the policy gives up.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        let result = match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Unavailable(format!(
                "{} timed out after {}ms",
                operation,
                policy.attempt_timeout.as_millis()
            ))),
        };

        match result {
            Err(err) if err.is_transient() && attempt < max_attempts => {
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Store call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(policy.backoff_multiplier);
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// A [`FuelStore`] that retries transient failures of the wrapped store.
#[derive(Clone)]
pub struct RetryingStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> RetryingStore<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: FuelStore> FuelStore for RetryingStore<S> {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        retry_with_backoff(&self.policy, "get_profile", || {
            self.inner.get_profile(user_id)
        })
        .await
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        retry_with_backoff(&self.policy, "upsert_profile", || {
            self.inner.upsert_profile(profile)
        })
        .await
    }

    async fn list_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>, AppError> {
        retry_with_backoff(&self.policy, "list_vehicles", || {
            self.inner.list_vehicles(user_id)
        })
        .await
    }

    async fn get_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        retry_with_backoff(&self.policy, "get_vehicle", || {
            self.inner.get_vehicle(user_id, vehicle_id)
        })
        .await
    }

    async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        retry_with_backoff(&self.policy, "create_vehicle", || {
            self.inner.create_vehicle(vehicle)
        })
        .await
    }

    async fn update_vehicle(
        &self,
        user_id: &str,
        vehicle_id: &str,
        draft: &VehicleDraft,
    ) -> Result<Option<Vehicle>, AppError> {
        retry_with_backoff(&self.policy, "update_vehicle", || {
            self.inner.update_vehicle(user_id, vehicle_id, draft)
        })
        .await
    }

    async fn delete_vehicle(&self, user_id: &str, vehicle_id: &str) -> Result<usize, AppError> {
        retry_with_backoff(&self.policy, "delete_vehicle", || {
            self.inner.delete_vehicle(user_id, vehicle_id)
        })
        .await
    }

    async fn fetch_entries(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> Result<Vec<FuelEntry>, AppError> {
        retry_with_backoff(&self.policy, "fetch_entries", || {
            self.inner.fetch_entries(user_id, filter)
        })
        .await
    }

    async fn get_entry(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<FuelEntry>, AppError> {
        retry_with_backoff(&self.policy, "get_entry", || {
            self.inner.get_entry(user_id, entry_id)
        })
        .await
    }

    async fn create_entry(&self, entry: &FuelEntry) -> Result<(), AppError> {
        retry_with_backoff(&self.policy, "create_entry", || {
            self.inner.create_entry(entry)
        })
        .await
    }

    async fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        draft: &FuelEntryDraft,
    ) -> Result<Option<FuelEntry>, AppError> {
        retry_with_backoff(&self.policy, "update_entry", || {
            self.inner.update_entry(user_id, entry_id, draft)
        })
        .await
    }

    async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<(), AppError> {
        retry_with_backoff(&self.policy, "delete_entry", || {
            self.inner.delete_entry(user_id, entry_id)
        })
        .await
    }

    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        retry_with_backoff(&self.policy, "delete_user_data", || {
            self.inner.delete_user_data(user_id)
        })
        .await
    }
}
