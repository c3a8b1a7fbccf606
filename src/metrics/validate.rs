// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Write-time checks for new or edited fill-ups.
//!
//! These are advisory: the write path decides whether to reject. Stored
//! history is never re-checked on read, so the aggregator still has to cope
//! with readings that would fail here.

use chrono::NaiveDate;

use crate::models::FuelEntry;

/// Reason a fill-up was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryRejection {
    #[error("Odometer must be greater than previous reading ({previous} km)")]
    OdometerNotIncreasing { previous: i64 },

    #[error("Date cannot be in the future")]
    DateInFuture { date: NaiveDate },
}

/// A new reading must exceed the previous one, when there is a previous one.
pub fn validate_odometer_increase(
    new_odometer: i64,
    previous_odometer: Option<i64>,
) -> Result<(), EntryRejection> {
    match previous_odometer {
        Some(previous) if new_odometer <= previous => {
            Err(EntryRejection::OdometerNotIncreasing { previous })
        }
        _ => Ok(()),
    }
}

/// The entry date may not be after `today`.
pub fn validate_date_not_future(date: NaiveDate, today: NaiveDate) -> Result<(), EntryRejection> {
    if date > today {
        Err(EntryRejection::DateInFuture { date })
    } else {
        Ok(())
    }
}

/// The reading a new entry on `date` must exceed: the latest entry of the
/// same vehicle dated on or before `date`, ignoring the entry being edited.
pub fn find_previous_entry<'a>(
    vehicle_entries: &'a [FuelEntry],
    date: NaiveDate,
    editing_id: Option<&str>,
) -> Option<&'a FuelEntry> {
    vehicle_entries
        .iter()
        .filter(|e| editing_id != Some(e.id.as_str()))
        .filter(|e| e.entry_date <= date)
        .max_by(|a, b| {
            a.entry_date
                .cmp(&b.entry_date)
                .then(a.odometer.cmp(&b.odometer))
        })
}
