// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fuel fill-up model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One refueling event, stored in base units (km, liters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelEntry {
    /// Entry ID (also used as document ID)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Owning vehicle
    pub vehicle_id: String,
    /// Calendar date of the fill-up
    pub entry_date: NaiveDate,
    /// Cumulative odometer reading (km)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub odometer: i64,
    pub station: String,
    pub brand: String,
    pub grade: String,
    /// Volume dispensed (liters)
    pub liters: f64,
    /// Cost paid in the user's currency
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FuelEntry {
    /// Build a stored entry from a validated draft.
    pub fn from_draft(id: String, user_id: &str, draft: FuelEntryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            vehicle_id: draft.vehicle_id,
            entry_date: draft.entry_date,
            odometer: draft.odometer,
            station: draft.station,
            brand: draft.brand,
            grade: draft.grade,
            liters: draft.liters,
            total: draft.total,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edited draft, keeping identity and creation time.
    pub fn apply_draft(&mut self, draft: FuelEntryDraft, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Self::from_draft(self.id.clone(), &self.user_id, draft, now);
        self.created_at = created_at;
    }
}

/// Create/update payload for a fill-up.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelEntryDraft {
    #[validate(length(min = 1, message = "Vehicle is required"))]
    pub vehicle_id: String,
    pub entry_date: NaiveDate,
    #[validate(range(min = 1, message = "Odometer must be positive"))]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub odometer: i64,
    #[validate(length(min = 1, max = 100, message = "Station is required (max 100 characters)"))]
    pub station: String,
    #[validate(length(min = 1, max = 50, message = "Brand is required (max 50 characters)"))]
    pub brand: String,
    #[validate(length(min = 1, max = 50, message = "Grade is required (max 50 characters)"))]
    pub grade: String,
    #[validate(range(exclusive_min = 0.0, message = "Liters must be positive"))]
    pub liters: f64,
    #[validate(range(exclusive_min = 0.0, message = "Total cost must be positive"))]
    pub total: f64,
    #[validate(length(max = 500, message = "Notes too long (max 500 characters)"))]
    #[serde(default)]
    pub notes: Option<String>,
}

/// Optional filters for fetching entries. Dates are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilter {
    pub vehicle_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub brand: Option<String>,
    pub grade: Option<String>,
    pub station: Option<String>,
}

impl EntryFilter {
    /// Filter on a single vehicle only.
    pub fn for_vehicle(vehicle_id: Option<String>) -> Self {
        Self {
            vehicle_id,
            ..Default::default()
        }
    }

    pub fn matches(&self, entry: &FuelEntry) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().is_none_or(|f| f == value)
        }

        eq(&self.vehicle_id, &entry.vehicle_id)
            && self.start_date.is_none_or(|d| entry.entry_date >= d)
            && self.end_date.is_none_or(|d| entry.entry_date <= d)
            && eq(&self.brand, &entry.brand)
            && eq(&self.grade, &entry.grade)
            && eq(&self.station, &entry.station)
    }

    /// The same filter without the vehicle restriction.
    pub fn without_vehicle(&self) -> Self {
        Self {
            vehicle_id: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FuelEntryDraft {
        FuelEntryDraft {
            vehicle_id: "v1".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            odometer: 1400,
            station: "Main St".to_string(),
            brand: "Shell".to_string(),
            grade: "95".to_string(),
            liters: 35.0,
            total: 52.5,
            notes: None,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let mut bad = draft();
        bad.liters = 0.0;
        bad.station = String::new();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("liters"));
        assert!(fields.contains_key("station"));

        let mut bad = draft();
        bad.odometer = 0;
        bad.notes = Some("x".repeat(501));
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("odometer"));
        assert!(errors.field_errors().contains_key("notes"));
    }

    #[test]
    fn test_apply_draft_keeps_identity() {
        let created = DateTime::parse_from_rfc3339("2024-01-10T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2024-02-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut entry = FuelEntry::from_draft("e1".to_string(), "u1", draft(), created);
        let mut edited = draft();
        edited.odometer = 1500;
        edited.notes = Some("  ".to_string());
        entry.apply_draft(edited, later);

        assert_eq!(entry.id, "e1");
        assert_eq!(entry.user_id, "u1");
        assert_eq!(entry.odometer, 1500);
        assert_eq!(entry.notes, None);
        assert_eq!(entry.created_at, created);
        assert_eq!(entry.updated_at, later);
    }

    #[test]
    fn test_filter_matches() {
        let entry = FuelEntry::from_draft("e1".to_string(), "u1", draft(), Utc::now());

        assert!(EntryFilter::default().matches(&entry));
        assert!(EntryFilter::for_vehicle(Some("v1".to_string())).matches(&entry));
        assert!(!EntryFilter::for_vehicle(Some("v2".to_string())).matches(&entry));

        let window = EntryFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            brand: Some("Shell".to_string()),
            ..Default::default()
        };
        assert!(window.matches(&entry));

        let wrong_grade = EntryFilter {
            grade: Some("Diesel".to_string()),
            ..Default::default()
        };
        assert!(!wrong_grade.matches(&entry));
    }
}
