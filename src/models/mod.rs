// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod entry;
pub mod profile;
pub mod vehicle;

pub use entry::{EntryFilter, FuelEntry, FuelEntryDraft};
pub use profile::{Profile, ProfileUpdate, UnitSystem};
pub use vehicle::{Vehicle, VehicleDraft};
