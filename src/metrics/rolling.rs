// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Period summaries for the dashboard cards.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::entry::FuelEntryWithMetrics;
use super::units::{round_half_up, round_to};
use super::MetricsError;

/// Averages and totals over the entries of one date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RollingStats {
    pub avg_cost_per_liter: f64,
    /// Mean L/100km over entries where it was derived
    pub avg_consumption: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub avg_distance_per_day: i64,
    pub avg_cost_per_km: f64,
    pub total_spend: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_distance: i64,
    pub period_days: u32,
}

impl RollingStats {
    /// All-zero stats for a window with no fill-ups.
    pub fn empty(period_days: u32) -> Self {
        Self {
            avg_cost_per_liter: 0.0,
            avg_consumption: 0.0,
            avg_distance_per_day: 0,
            avg_cost_per_km: 0.0,
            total_spend: 0.0,
            total_distance: 0,
            period_days,
        }
    }
}

/// Mean of the defined values, rounded; 0 when none are defined.
pub(crate) fn mean_of_defined<I>(values: I, places: i32) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        round_to(sum / count as f64, places)
    }
}

/// Summarize entries already narrowed to a window of `period_days` days.
///
/// An empty window yields [`RollingStats::empty`]. A non-empty window whose
/// volumes sum to zero, or a zero-day period, is a [`MetricsError`].
pub fn calculate_rolling_stats(
    entries: &[FuelEntryWithMetrics],
    period_days: u32,
) -> Result<RollingStats, MetricsError> {
    if entries.is_empty() {
        return Ok(RollingStats::empty(period_days));
    }

    let total_spend: f64 = entries.iter().map(|e| e.entry.total).sum();
    let total_liters: f64 = entries.iter().map(|e| e.entry.liters).sum();
    let total_distance: i64 = entries.iter().filter_map(|e| e.distance_since_last).sum();

    if !(total_liters > 0.0) {
        return Err(MetricsError::NonPositiveVolume {
            metric: "avg_cost_per_liter",
            liters: total_liters,
        });
    }
    if period_days == 0 {
        return Err(MetricsError::NonFinite {
            metric: "avg_distance_per_day",
        });
    }

    let avg_cost_per_liter = round_to(total_spend / total_liters, 2);
    if !avg_cost_per_liter.is_finite() {
        return Err(MetricsError::NonFinite {
            metric: "avg_cost_per_liter",
        });
    }

    Ok(RollingStats {
        avg_cost_per_liter,
        avg_consumption: mean_of_defined(entries.iter().map(|e| e.consumption_l_per_100km), 1),
        avg_distance_per_day: round_half_up(total_distance as f64 / period_days as f64),
        avg_cost_per_km: mean_of_defined(entries.iter().map(|e| e.cost_per_km), 2),
        total_spend: round_to(total_spend, 2),
        total_distance,
        period_days,
    })
}
