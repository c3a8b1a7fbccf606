// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics routes: period summaries and brand/grade comparison.

use crate::db::FuelStore;
use crate::error::Result;
use crate::metrics::brand_grade::rank_by_fillups;
use crate::metrics::{
    calculate_all_metrics, calculate_brand_grade_stats, calculate_rolling_stats,
    BrandGradeHighlights, BrandGradeStats, DateWindow, Period, RollingStats,
};
use crate::middleware::auth::AuthUser;
use crate::models::EntryFilter;
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats/rolling", get(get_rolling_stats))
        .route("/api/stats/brands", get(get_brand_stats))
}

// ─── Rolling Statistics ──────────────────────────────────────

#[derive(Deserialize)]
struct RollingQuery {
    /// `30`, `90`, `ytd` or `custom`
    #[serde(default = "default_period")]
    period: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    vehicle_id: Option<String>,
}

fn default_period() -> String {
    "30".to_string()
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RollingStatsResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entry_count: usize,
    #[serde(flatten)]
    pub stats: RollingStats,
}

/// Summary for the selected period.
///
/// Metrics are derived over the full history before the window is applied,
/// so the first fill-up inside the window still gets its distance.
async fn get_rolling_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RollingQuery>,
) -> Result<Json<RollingStatsResponse>> {
    let window: DateWindow =
        Period::parse(&query.period, query.start, query.end)?.window(today())?;

    let entries = state
        .db
        .fetch_entries(&user.user_id, &EntryFilter::for_vehicle(query.vehicle_id))
        .await?;
    let in_window = window.filter(calculate_all_metrics(&entries));

    let stats = calculate_rolling_stats(&in_window, window.period_days)?;

    tracing::debug!(
        user_id = %user.user_id,
        period = %query.period,
        entries = in_window.len(),
        "Computed rolling stats"
    );

    Ok(Json(RollingStatsResponse {
        start: window.start,
        end: window.end,
        entry_count: in_window.len(),
        stats,
    }))
}

// ─── Brand / Grade ───────────────────────────────────────────

#[derive(Deserialize)]
struct BrandQuery {
    vehicle_id: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BrandStatsResponse {
    /// Most used first
    pub stats: Vec<BrandGradeStats>,
    pub highlights: BrandGradeHighlights,
}

async fn get_brand_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<BrandStatsResponse>> {
    let entries = state
        .db
        .fetch_entries(&user.user_id, &EntryFilter::for_vehicle(query.vehicle_id))
        .await?;

    let mut stats = calculate_brand_grade_stats(&calculate_all_metrics(&entries));
    rank_by_fillups(&mut stats);
    let highlights = BrandGradeHighlights::from_stats(&stats);

    Ok(Json(BrandStatsResponse { stats, highlights }))
}
