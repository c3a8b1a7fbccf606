// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle CRUD routes.

use crate::db::{new_id, FuelStore};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Vehicle, VehicleDraft};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/api/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

fn vehicle_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Vehicle {} not found", id))
}

async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Vehicle>>> {
    Ok(Json(state.db.list_vehicles(&user.user_id).await?))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>> {
    state
        .db
        .get_vehicle(&user.user_id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| vehicle_not_found(&id))
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<VehicleDraft>,
) -> Result<(StatusCode, Json<Vehicle>)> {
    draft.validate()?;

    let vehicle = Vehicle::from_draft(new_id(), &user.user_id, draft, Utc::now());
    state.db.create_vehicle(&vehicle).await?;
    tracing::info!(user_id = %user.user_id, vehicle_id = %vehicle.id, "Vehicle created");

    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(draft): Json<VehicleDraft>,
) -> Result<Json<Vehicle>> {
    draft.validate()?;

    state
        .db
        .update_vehicle(&user.user_id, &id, &draft)
        .await?
        .map(Json)
        .ok_or_else(|| vehicle_not_found(&id))
}

/// Deletes the vehicle together with its fill-ups.
async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let removed = state.db.delete_vehicle(&user.user_id, &id).await?;
    if removed == 0 {
        return Err(vehicle_not_found(&id));
    }

    tracing::info!(user_id = %user.user_id, vehicle_id = %id, removed, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
