// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-entry derived metrics and the history aggregator.
//!
//! Derived metrics are never stored. They are recomputed from the raw
//! fill-ups of each vehicle on every read, pairing each entry with its
//! chronological predecessor.

use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::units::{round_to, KM_PER_MILE, LITERS_PER_GALLON};
use super::MetricsError;
use crate::models::FuelEntry;

/// A fill-up with the figures derived from its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelEntryWithMetrics {
    #[serde(flatten)]
    pub entry: FuelEntry,
    /// Odometer delta (km) from the previous fill-up of the same vehicle
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub distance_since_last: Option<i64>,
    /// Price per liter; absent only when the stored volume is unusable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_l_per_100km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_mpg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_mile: Option<f64>,
}

/// Divide, yielding `None` instead of an infinite or NaN quotient.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Price per liter, rounded to 2 decimals.
fn unit_price(entry: &FuelEntry) -> Result<f64, MetricsError> {
    if !(entry.liters > 0.0) {
        return Err(MetricsError::NonPositiveVolume {
            metric: "unit_price",
            liters: entry.liters,
        });
    }
    ratio(entry.total, entry.liters)
        .map(|price| round_to(price, 2))
        .ok_or(MetricsError::NonFinite {
            metric: "unit_price",
        })
}

fn derive(
    entry: &FuelEntry,
    previous: Option<&FuelEntry>,
    unit_price: Option<f64>,
) -> FuelEntryWithMetrics {
    let distance_since_last = previous.map(|prev| entry.odometer - prev.odometer);

    let mut metrics = FuelEntryWithMetrics {
        entry: entry.clone(),
        distance_since_last,
        unit_price,
        consumption_l_per_100km: None,
        consumption_mpg: None,
        cost_per_km: None,
        cost_per_mile: None,
    };

    // A non-positive delta means out-of-order or corrupt readings.
    let Some(distance) = distance_since_last.filter(|d| *d > 0) else {
        return metrics;
    };
    let distance = distance as f64;

    metrics.consumption_l_per_100km =
        ratio(entry.liters, distance).map(|per_km| round_to(per_km * 100.0, 1));

    let miles = distance / KM_PER_MILE;
    let gallons = entry.liters / LITERS_PER_GALLON;
    metrics.consumption_mpg = ratio(miles, gallons).map(|mpg| round_to(mpg, 1));

    metrics.cost_per_km = ratio(entry.total, distance).map(|cost| round_to(cost, 2));
    metrics.cost_per_mile = metrics
        .cost_per_km
        .map(|cost| round_to(cost * KM_PER_MILE, 2));

    metrics
}

/// Derive metrics for one entry given the previous entry of the same vehicle.
///
/// Consumption and cost-per-distance are only derived when the odometer
/// advanced since `previous`. An entry whose volume is zero, negative or
/// unusable yields [`MetricsError`] instead of a non-finite price.
pub fn calculate_metrics(
    entry: &FuelEntry,
    previous: Option<&FuelEntry>,
) -> Result<FuelEntryWithMetrics, MetricsError> {
    let price = unit_price(entry)?;
    Ok(derive(entry, previous, Some(price)))
}

/// Derive metrics for a whole history, vehicle by vehicle.
///
/// Each vehicle's entries are ordered by date (then odometer) and paired with
/// their predecessor. Output is grouped per vehicle; it does not preserve
/// input order. Entries with unusable volumes are still returned, with
/// `unit_price` left out.
pub fn calculate_all_metrics(entries: &[FuelEntry]) -> Vec<FuelEntryWithMetrics> {
    let mut by_vehicle: BTreeMap<&str, Vec<&FuelEntry>> = BTreeMap::new();
    for entry in entries {
        by_vehicle
            .entry(entry.vehicle_id.as_str())
            .or_default()
            .push(entry);
    }

    let mut results = Vec::with_capacity(entries.len());

    for (vehicle_id, mut history) in by_vehicle {
        history.sort_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then(a.odometer.cmp(&b.odometer))
        });

        let mut previous: Option<&FuelEntry> = None;
        for entry in history {
            let derived = match calculate_metrics(entry, previous) {
                Ok(derived) => derived,
                Err(e) => {
                    tracing::warn!(
                        entry_id = %entry.id,
                        vehicle_id,
                        error = %e,
                        "Unit price unavailable for entry"
                    );
                    derive(entry, previous, None)
                }
            };

            if derived.distance_since_last.is_some_and(|d| d <= 0) {
                tracing::warn!(
                    entry_id = %entry.id,
                    vehicle_id,
                    odometer = entry.odometer,
                    "Odometer did not increase; consumption not derived"
                );
            }

            results.push(derived);
            previous = Some(entry);
        }
    }

    tracing::debug!(entries = results.len(), "Derived entry metrics");
    results
}
