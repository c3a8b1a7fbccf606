// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model: display preferences for currency, units and time zone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::metrics::units::{DistanceUnit, VolumeUnit};

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Measurement system preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn distance_unit(&self) -> DistanceUnit {
        match self {
            UnitSystem::Metric => DistanceUnit::Kilometers,
            UnitSystem::Imperial => DistanceUnit::Miles,
        }
    }

    pub fn volume_unit(&self) -> VolumeUnit {
        match self {
            UnitSystem::Metric => VolumeUnit::Liters,
            UnitSystem::Imperial => VolumeUnit::Gallons,
        }
    }
}

/// User profile stored in Firestore (document ID = user ID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// ISO 4217 code, e.g. "EUR"
    pub currency: String,
    pub unit_system: UnitSystem,
    /// IANA zone name, e.g. "Europe/Berlin"
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Profile for a user who has not saved any settings yet.
    pub fn new_default(user_id: &str, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            email,
            display_name: None,
            currency: DEFAULT_CURRENCY.to_string(),
            unit_system: UnitSystem::default(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn distance_unit(&self) -> DistanceUnit {
        self.unit_system.distance_unit()
    }

    pub fn volume_unit(&self) -> VolumeUnit {
        self.unit_system.volume_unit()
    }

    pub fn apply_update(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        self.display_name = update.display_name.filter(|n| !n.trim().is_empty());
        self.currency = update.currency.to_uppercase();
        self.unit_system = update.unit_system;
        self.time_zone = update.time_zone;
        self.updated_at = now;
    }
}

/// Settings form payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileUpdate {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub display_name: Option<String>,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    pub unit_system: UnitSystem,
    #[validate(length(min = 1, message = "Time zone is required"))]
    pub time_zone: String,
}

fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency")
            .with_message("Currency must be 3 letters (e.g., EUR)".into()))
    }
}
