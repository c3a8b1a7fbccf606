// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fill-up routes: listing with derived metrics, and validated writes.

use crate::db::{new_id, FuelStore};
use crate::error::{AppError, Result};
use crate::metrics::units::{
    consumption_label, consumption_value, convert_distance, convert_volume, DistanceUnit,
    VolumeUnit,
};
use crate::metrics::validate::find_previous_entry;
use crate::metrics::{
    calculate_all_metrics, validate_date_not_future, validate_odometer_increase,
    FuelEntryWithMetrics,
};
use crate::middleware::auth::AuthUser;
use crate::models::{EntryFilter, FuelEntry, FuelEntryDraft, Profile};
use crate::routes::api::load_profile;
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/entries", get(list_entries).post(create_entry))
        .route(
            "/api/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

/// Values converted to the user's preferred units.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryDisplay {
    pub distance_unit: DistanceUnit,
    pub volume_unit: VolumeUnit,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub odometer: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub distance: Option<i64>,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption: Option<f64>,
    pub consumption_label: String,
}

impl EntryDisplay {
    fn new(entry: &FuelEntryWithMetrics, profile: &Profile) -> Self {
        let distance_unit = profile.distance_unit();
        let volume_unit = profile.volume_unit();
        Self {
            distance_unit,
            volume_unit,
            odometer: convert_distance(entry.entry.odometer as f64, distance_unit),
            distance: entry
                .distance_since_last
                .map(|km| convert_distance(km as f64, distance_unit)),
            volume: convert_volume(entry.entry.liters, volume_unit),
            consumption: consumption_value(entry, distance_unit),
            consumption_label: consumption_label(distance_unit).to_string(),
        }
    }
}

/// A fill-up with its metrics and display block.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryResponse {
    #[serde(flatten)]
    pub metrics: FuelEntryWithMetrics,
    pub display: EntryDisplay,
}

impl EntryResponse {
    fn new(metrics: FuelEntryWithMetrics, profile: &Profile) -> Self {
        let display = EntryDisplay::new(&metrics, profile);
        Self { metrics, display }
    }
}

/// Metrics for one vehicle's history, so each entry sees its true predecessor.
async fn vehicle_history(
    state: &AppState,
    user_id: &str,
    vehicle_id: Option<String>,
) -> Result<Vec<FuelEntryWithMetrics>> {
    let entries = state
        .db
        .fetch_entries(user_id, &EntryFilter::for_vehicle(vehicle_id))
        .await?;
    Ok(calculate_all_metrics(&entries))
}

fn newest_first(entries: &mut [FuelEntryWithMetrics]) {
    entries.sort_by(|a, b| {
        b.entry
            .entry_date
            .cmp(&a.entry.entry_date)
            .then(b.entry.odometer.cmp(&a.entry.odometer))
    });
}

/// Check a create or update against the stored history.
///
/// Order: field rules, vehicle ownership, date, then odometer against the
/// previous fill-up of the same vehicle.
async fn validate_write(
    state: &AppState,
    user_id: &str,
    draft: &FuelEntryDraft,
    editing_id: Option<&str>,
) -> Result<()> {
    draft.validate()?;

    if state
        .db
        .get_vehicle(user_id, &draft.vehicle_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Vehicle {} not found",
            draft.vehicle_id
        )));
    }

    validate_date_not_future(draft.entry_date, today())?;

    let history: Vec<FuelEntry> = state
        .db
        .fetch_entries(
            user_id,
            &EntryFilter::for_vehicle(Some(draft.vehicle_id.clone())),
        )
        .await?;
    let previous = find_previous_entry(&history, draft.entry_date, editing_id);
    validate_odometer_increase(draft.odometer, previous.map(|e| e.odometer))?;

    Ok(())
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<EntryResponse>>> {
    let profile = load_profile(&state, &user).await?;

    let narrow = filter.without_vehicle();
    let mut entries: Vec<FuelEntryWithMetrics> =
        vehicle_history(&state, &user.user_id, filter.vehicle_id.clone())
            .await?
            .into_iter()
            .filter(|e| narrow.matches(&e.entry))
            .collect();
    newest_first(&mut entries);

    tracing::debug!(user_id = %user.user_id, count = entries.len(), "Listed entries");

    Ok(Json(
        entries
            .into_iter()
            .map(|e| EntryResponse::new(e, &profile))
            .collect(),
    ))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<EntryResponse>> {
    let entry = state
        .db
        .get_entry(&user.user_id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))?;

    let metrics = vehicle_history(&state, &user.user_id, Some(entry.vehicle_id))
        .await?
        .into_iter()
        .find(|e| e.entry.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))?;

    let profile = load_profile(&state, &user).await?;
    Ok(Json(EntryResponse::new(metrics, &profile)))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<FuelEntryDraft>,
) -> Result<(StatusCode, Json<FuelEntry>)> {
    validate_write(&state, &user.user_id, &draft, None).await?;

    let entry = FuelEntry::from_draft(new_id(), &user.user_id, draft, Utc::now());
    state.db.create_entry(&entry).await?;
    tracing::info!(
        user_id = %user.user_id,
        entry_id = %entry.id,
        vehicle_id = %entry.vehicle_id,
        "Fuel entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(draft): Json<FuelEntryDraft>,
) -> Result<Json<FuelEntry>> {
    if state.db.get_entry(&user.user_id, &id).await?.is_none() {
        return Err(AppError::NotFound(format!("Entry {} not found", id)));
    }

    validate_write(&state, &user.user_id, &draft, Some(&id)).await?;

    state
        .db
        .update_entry(&user.user_id, &id, &draft)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.db.delete_entry(&user.user_id, &id).await?;
    tracing::info!(user_id = %user.user_id, entry_id = %id, "Fuel entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
