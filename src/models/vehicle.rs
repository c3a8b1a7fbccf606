// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle model for storage and API.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Vehicle record stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Vehicle {
    /// Vehicle ID (also used as document ID)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Display name (e.g. "Family Wagon")
    pub name: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn from_draft(id: String, user_id: &str, draft: VehicleDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            name: draft.name,
            make: draft.make,
            model: draft.model,
            year: draft.year,
            fuel_type: draft.fuel_type,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_draft(&mut self, draft: VehicleDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.make = draft.make;
        self.model = draft.model;
        self.year = draft.year;
        self.fuel_type = draft.fuel_type;
        self.updated_at = now;
    }
}

/// Create/update payload for a vehicle.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleDraft {
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub make: Option<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub model: Option<String>,
    #[validate(custom(function = "validate_model_year"))]
    #[serde(default)]
    pub year: Option<i32>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub fuel_type: Option<String>,
}

/// Model years run from 1900 through next calendar year.
fn validate_model_year(year: i32) -> Result<(), ValidationError> {
    let year = &year;
    let max_year = Utc::now().year() + 1;
    if *year < 1900 {
        return Err(ValidationError::new("year").with_message("Invalid year".into()));
    }
    if *year > max_year {
        return Err(
            ValidationError::new("year").with_message("Year cannot be in the future".into())
        );
    }
    Ok(())
}
