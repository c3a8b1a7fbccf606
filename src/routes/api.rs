// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and account routes for authenticated users.

use crate::db::FuelStore;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Profile, ProfileUpdate};
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/account", delete(delete_account))
}

/// The stored profile, or the defaults for a user who never saved one.
pub(crate) async fn load_profile(state: &AppState, user: &AuthUser) -> Result<Profile> {
    Ok(state
        .db
        .get_profile(&user.user_id)
        .await?
        .unwrap_or_else(|| {
            Profile::new_default(&user.user_id, user.email.clone(), chrono::Utc::now())
        }))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    Ok(Json(load_profile(&state, &user).await?))
}

/// Update profile settings (display name, currency, units, time zone).
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>> {
    update.validate()?;

    let mut profile = load_profile(&state, &user).await?;
    profile.apply_update(update, chrono::Utc::now());
    if profile.email.is_none() {
        profile.email = user.email.clone();
    }
    state.db.upsert_profile(&profile).await?;

    tracing::info!(
        user_id = %user.user_id,
        unit_system = ?profile.unit_system,
        "Profile updated"
    );
    Ok(Json(profile))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_records: usize,
}

/// Delete the user's profile, vehicles and fill-ups.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    let deleted_records = state.db.delete_user_data(&user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_records,
    }))
}
