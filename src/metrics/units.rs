// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unit preferences and conversion from the stored base units.
//!
//! Odometer readings and distances are stored in kilometers and volumes in
//! liters. Conversion happens only for display, driven by the profile's
//! distance and volume units.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::entry::FuelEntryWithMetrics;

/// Liters in one US gallon.
pub const LITERS_PER_GALLON: f64 = 3.78541;
/// Kilometers in one statute mile.
pub const KM_PER_MILE: f64 = 1.60934;

/// Distance display unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

/// Volume display unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "gal")]
    Gallons,
}

impl VolumeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liters => "L",
            VolumeUnit::Gallons => "gal",
        }
    }
}

/// Round to a fixed number of decimal places, halves away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Convert a volume in liters to the requested unit, rounded to 2 decimals.
pub fn convert_volume(liters: f64, to: VolumeUnit) -> f64 {
    match to {
        VolumeUnit::Liters => round_to(liters, 2),
        VolumeUnit::Gallons => round_to(liters / LITERS_PER_GALLON, 2),
    }
}

/// Convert a distance in kilometers to the requested unit, rounded to an integer.
pub fn convert_distance(km: f64, to: DistanceUnit) -> i64 {
    match to {
        DistanceUnit::Kilometers => round_half_up(km),
        DistanceUnit::Miles => round_half_up(km / KM_PER_MILE),
    }
}

/// Label for the consumption figure shown in the given distance unit.
pub fn consumption_label(unit: DistanceUnit) -> &'static str {
    match unit {
        DistanceUnit::Kilometers => "L/100km",
        DistanceUnit::Miles => "MPG",
    }
}

/// Consumption figure matching the given distance unit, if derived.
pub fn consumption_value(entry: &FuelEntryWithMetrics, unit: DistanceUnit) -> Option<f64> {
    match unit {
        DistanceUnit::Kilometers => entry.consumption_l_per_100km,
        DistanceUnit::Miles => entry.consumption_mpg,
    }
}
