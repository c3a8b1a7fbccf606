// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fuel metrics engine.
//!
//! Pure, synchronous functions that turn raw fill-ups into consumption and
//! cost figures:
//! - `units`: display unit conversion
//! - `entry`: per-entry metrics and the per-vehicle aggregator
//! - `rolling`: period summaries over a date window
//! - `brand_grade`: summaries per (brand, grade) pair
//! - `period`: date windows for the period selector
//! - `validate`: write-time odometer and date checks

pub mod brand_grade;
pub mod entry;
pub mod period;
pub mod rolling;
pub mod units;
pub mod validate;

pub use brand_grade::{calculate_brand_grade_stats, BrandGradeHighlights, BrandGradeStats};
pub use entry::{calculate_all_metrics, calculate_metrics, FuelEntryWithMetrics};
pub use period::{DateWindow, Period, PeriodError};
pub use rolling::{calculate_rolling_stats, RollingStats};
pub use validate::{validate_date_not_future, validate_odometer_increase, EntryRejection};

/// A ratio that cannot be computed from the given inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("{metric} requires a positive volume, got {liters} L")]
    NonPositiveVolume { metric: &'static str, liters: f64 },

    #[error("{metric} is not a finite number")]
    NonFinite { metric: &'static str },
}
