// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date windows behind the period selector (30 days, 90 days, YTD, custom).

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::entry::FuelEntryWithMetrics;

/// A selectable statistics period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The trailing N days up to today
    Days(u32),
    YearToDate,
    /// Inclusive custom range
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Errors from resolving a period.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Unknown period '{0}' (expected 30, 90, ytd or custom)")]
    Unknown(String),

    #[error("Custom period requires both start and end dates")]
    MissingRange,

    #[error("Period end {end} is before start {start}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("Period must span at least one day")]
    Empty,
}

impl Period {
    /// Parse the selector value. `start`/`end` are used only for `custom`.
    pub fn parse(
        value: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, PeriodError> {
        match value {
            "ytd" => Ok(Period::YearToDate),
            "custom" => match (start, end) {
                (Some(start), Some(end)) => Ok(Period::Custom { start, end }),
                _ => Err(PeriodError::MissingRange),
            },
            days => match days.parse::<u32>() {
                Ok(0) => Err(PeriodError::Empty),
                Ok(n) => Ok(Period::Days(n)),
                Err(_) => Err(PeriodError::Unknown(value.to_string())),
            },
        }
    }

    /// Resolve to a concrete window relative to `today`.
    pub fn window(&self, today: NaiveDate) -> Result<DateWindow, PeriodError> {
        match *self {
            Period::Days(0) => Err(PeriodError::Empty),
            Period::Days(days) => Ok(DateWindow {
                start: today - Duration::days(days.into()),
                end: today,
                period_days: days,
            }),
            Period::YearToDate => Ok(DateWindow {
                start: today.with_ordinal(1).unwrap_or(today),
                end: today,
                period_days: today.ordinal(),
            }),
            Period::Custom { start, end } => {
                if end < start {
                    return Err(PeriodError::Inverted { start, end });
                }
                let span = (end - start).num_days() + 1;
                Ok(DateWindow {
                    start,
                    end,
                    period_days: u32::try_from(span).map_err(|_| PeriodError::Empty)?,
                })
            }
        }
    }
}

/// Inclusive date range and its nominal length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period_days: u32,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Keep the entries dated inside this window.
    pub fn filter(&self, entries: Vec<FuelEntryWithMetrics>) -> Vec<FuelEntryWithMetrics> {
        entries
            .into_iter()
            .filter(|e| self.contains(e.entry.entry_date))
            .collect()
    }
}
