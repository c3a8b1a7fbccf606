// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics API tests: period windows and brand/grade summaries.

use axum::http::StatusCode;
use chrono::{Datelike, Duration, Local};
use serde_json::json;

mod common;
use common::{create_entry, create_test_app, create_test_jwt, create_vehicle, send};

fn days_ago(days: i64) -> String {
    (Local::now().date_naive() - Duration::days(days)).to_string()
}

/// Three fill-ups within the last three weeks: 900 km driven in total.
async fn seed_recent_history(app: &axum::Router, token: &str) -> String {
    let car = create_vehicle(app, token, "Car").await;
    create_entry(app, token, &car, &days_ago(20), 1000, 40.0, 60.0).await;
    create_entry(app, token, &car, &days_ago(10), 1400, 35.0, 52.5).await;
    create_entry(app, token, &car, &days_ago(5), 1900, 40.0, 64.0).await;
    car
}

#[tokio::test]
async fn test_rolling_stats_30_days() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);
    seed_recent_history(&app, &token).await;

    let (status, body) = send(&app, "GET", "/api/stats/rolling?period=30", &token, None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    assert_eq!(body["entry_count"], 3);
    assert_eq!(body["period_days"], 30);
    assert_eq!(body["total_spend"], 176.5);
    assert_eq!(body["avg_cost_per_liter"], 1.53);
    assert_eq!(body["avg_consumption"], 8.4);
    assert_eq!(body["avg_cost_per_km"], 0.13);
    assert_eq!(body["total_distance"], 900);
    assert_eq!(body["avg_distance_per_day"], 30);
    assert_eq!(body["end"], days_ago(0));
    assert_eq!(body["start"], days_ago(30));
}

#[tokio::test]
async fn test_window_keeps_distance_from_earlier_fillup() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);
    seed_recent_history(&app, &token).await;

    // Only the newest fill-up is inside; its predecessor is not.
    let (status, body) = send(&app, "GET", "/api/stats/rolling?period=7", &token, None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["entry_count"], 1);
    assert_eq!(body["total_distance"], 500);
    // 500 / 7 = 71.4
    assert_eq!(body["avg_distance_per_day"], 71);
    assert_eq!(body["total_spend"], 64.0);
    assert_eq!(body["avg_cost_per_liter"], 1.6);
    assert_eq!(body["avg_consumption"], 8.0);
}

#[tokio::test]
async fn test_empty_window_is_zeroes() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);

    let (status, body) = send(&app, "GET", "/api/stats/rolling?period=90", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry_count"], 0);
    assert_eq!(body["period_days"], 90);
    assert_eq!(body["total_spend"], 0.0);
    assert_eq!(body["avg_distance_per_day"], 0);
}

#[tokio::test]
async fn test_ytd_and_custom_periods() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);

    let (status, body) = send(&app, "GET", "/api/stats/rolling?period=ytd", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_days"], Local::now().date_naive().ordinal());

    let (status, body) = send(
        &app,
        "GET",
        "/api/stats/rolling?period=custom&start=2024-01-01&end=2024-01-31",
        &token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period_days"], 31);
}

#[tokio::test]
async fn test_bad_periods_rejected() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);

    for uri in [
        "/api/stats/rolling?period=fortnight",
        "/api/stats/rolling?period=custom&start=2024-01-01",
        "/api/stats/rolling?period=custom&start=2024-02-01&end=2024-01-01",
        "/api/stats/rolling?period=0",
    ] {
        let (status, body) = send(&app, "GET", uri, &token, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_rolling_stats_per_vehicle() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);
    seed_recent_history(&app, &token).await;
    let van = create_vehicle(&app, &token, "Van").await;
    create_entry(&app, &token, &van, &days_ago(3), 20000, 50.0, 80.0).await;

    let uri = format!("/api/stats/rolling?period=30&vehicle_id={}", van);
    let (_, body) = send(&app, "GET", &uri, &token, None).await;
    assert_eq!(body["entry_count"], 1);
    assert_eq!(body["total_distance"], 0);
    assert_eq!(body["total_spend"], 80.0);
}

#[tokio::test]
async fn test_brand_stats_ranked_with_highlights() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);
    let car = create_vehicle(&app, &token, "Car").await;
    create_entry(&app, &token, &car, "2024-01-01", 1000, 40.0, 60.0).await;
    create_entry(&app, &token, &car, "2024-01-10", 1400, 35.0, 52.5).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/entries",
        &token,
        Some(json!({
            "vehicle_id": car,
            "entry_date": "2024-01-20",
            "odometer": 1900,
            "station": "Highway",
            "brand": "BP",
            "grade": "Diesel",
            "liters": 40.0,
            "total": 56.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/api/stats/brands", &token, None).await;
    assert_eq!(status, StatusCode::OK);

    let stats = body["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["brand"], "Shell");
    assert_eq!(stats[0]["fillup_count"], 2);
    assert_eq!(stats[0]["avg_cost_per_liter"], 1.5);
    assert_eq!(stats[1]["brand"], "BP");
    assert_eq!(stats[1]["avg_consumption"], 8.0);

    assert_eq!(body["highlights"]["most_used"]["brand"], "Shell");
    assert_eq!(body["highlights"]["best_consumption"]["brand"], "BP");
    assert_eq!(body["highlights"]["lowest_cost_per_liter"]["brand"], "BP");
}

#[tokio::test]
async fn test_brand_stats_empty() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("user-1", &state.config.jwt_signing_key);

    let (status, body) = send(&app, "GET", "/api/stats/brands", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"].as_array().unwrap().len(), 0);
    assert!(body["highlights"]["most_used"].is_null());
}
