// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export of everything stored for the user.

use crate::db::FuelStore;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{EntryFilter, FuelEntry, Profile, Vehicle};
use crate::routes::api::load_profile;
use crate::time_utils::{format_utc_rfc3339, today};
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/export", get(export_data))
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Write one titled section: a header row followed by `rows`, or `empty`
/// when there are none.
fn write_section(
    out: &mut Vec<u8>,
    title: &str,
    header: &[&str],
    rows: Vec<Vec<String>>,
    empty: &str,
) -> std::result::Result<(), csv::Error> {
    out.extend_from_slice(format!("=== {} ===\n", title).as_bytes());

    if rows.is_empty() {
        out.extend_from_slice(empty.as_bytes());
        out.push(b'\n');
    } else {
        let mut writer = csv::Writer::from_writer(&mut *out);
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
    }

    out.push(b'\n');
    Ok(())
}

/// Render the three export sections: profile, vehicles, fill-ups.
pub fn render_export(
    profile: &Profile,
    vehicles: &[Vehicle],
    entries: &[FuelEntry],
) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut out = Vec::new();

    let unit_system = match profile.unit_system {
        crate::models::UnitSystem::Metric => "metric",
        crate::models::UnitSystem::Imperial => "imperial",
    };
    let profile_rows = [
        ("user_id", profile.user_id.clone()),
        ("email", opt(&profile.email)),
        ("display_name", opt(&profile.display_name)),
        ("currency", profile.currency.clone()),
        ("unit_system", unit_system.to_string()),
        ("time_zone", profile.time_zone.clone()),
        ("created_at", format_utc_rfc3339(profile.created_at)),
        ("updated_at", format_utc_rfc3339(profile.updated_at)),
    ]
    .into_iter()
    .map(|(field, value)| vec![field.to_string(), value])
    .collect();
    write_section(
        &mut out,
        "USER PROFILE",
        &["Field", "Value"],
        profile_rows,
        "No profile found",
    )?;

    let vehicle_rows = vehicles
        .iter()
        .map(|v| {
            vec![
                v.id.clone(),
                v.name.clone(),
                opt(&v.make),
                opt(&v.model),
                v.year.map(|y| y.to_string()).unwrap_or_default(),
                opt(&v.fuel_type),
                format_utc_rfc3339(v.created_at),
                format_utc_rfc3339(v.updated_at),
            ]
        })
        .collect();
    write_section(
        &mut out,
        "VEHICLES",
        &[
            "id", "name", "make", "model", "year", "fuel_type", "created_at", "updated_at",
        ],
        vehicle_rows,
        "No vehicles found",
    )?;

    let entry_rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.vehicle_id.clone(),
                e.entry_date.to_string(),
                e.odometer.to_string(),
                e.station.clone(),
                e.brand.clone(),
                e.grade.clone(),
                e.liters.to_string(),
                e.total.to_string(),
                opt(&e.notes),
                format_utc_rfc3339(e.created_at),
                format_utc_rfc3339(e.updated_at),
            ]
        })
        .collect();
    write_section(
        &mut out,
        "FUEL ENTRIES",
        &[
            "id",
            "vehicle_id",
            "entry_date",
            "odometer",
            "station",
            "brand",
            "grade",
            "liters",
            "total",
            "notes",
            "created_at",
            "updated_at",
        ],
        entry_rows,
        "No fuel entries found",
    )?;

    Ok(out)
}

async fn export_data(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response> {
    let profile = load_profile(&state, &user).await?;
    let vehicles = state.db.list_vehicles(&user.user_id).await?;
    let mut entries = state
        .db
        .fetch_entries(&user.user_id, &EntryFilter::default())
        .await?;
    entries.sort_by(|a, b| {
        a.entry_date
            .cmp(&b.entry_date)
            .then(a.odometer.cmp(&b.odometer))
    });

    let body = render_export(&profile, &vehicles, &entries)
        .map_err(|e| AppError::Internal(e.into()))?;

    tracing::info!(
        user_id = %user.user_id,
        vehicles = vehicles.len(),
        entries = entries.len(),
        "Data exported"
    );

    let disposition = format!(
        "attachment; filename=\"fuelapp-data-export-{}.csv\"",
        today().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::test_support::entry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_export_sections() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let profile = Profile::new_default("user-1", Some("a@example.com".to_string()), now);
        let mut fill = entry("e1", "v1", "2024-01-10", 1400, 35.0, 52.5);
        fill.station = "Main St, North".to_string();

        let csv = String::from_utf8(render_export(&profile, &[], &[fill]).unwrap()).unwrap();

        assert!(csv.starts_with("=== USER PROFILE ===\nField,Value\nuser_id,user-1\n"));
        assert!(csv.contains("currency,EUR\n"));
        assert!(csv.contains("=== VEHICLES ===\nNo vehicles found\n"));
        assert!(csv.contains("=== FUEL ENTRIES ===\nid,vehicle_id,entry_date,"));
        // Commas inside a field are quoted.
        assert!(csv.contains("e1,v1,2024-01-10,1400,\"Main St, North\",Shell,95,35,52.5,"));
    }
}
