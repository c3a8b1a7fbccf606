// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fuel_tracker::error::AppError;
use fuel_tracker::metrics::{EntryRejection, MetricsError, PeriodError};

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_rejection_maps_to_validation_error() {
    let (status, body) =
        render(EntryRejection::OdometerNotIncreasing { previous: 1000 }.into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(
        body["details"],
        "Odometer must be greater than previous reading (1000 km)"
    );
}

#[tokio::test]
async fn test_computation_error_is_distinct() {
    let err: AppError = MetricsError::NonPositiveVolume {
        metric: "avg_cost_per_liter",
        liters: 0.0,
    }
    .into();
    let (status, body) = render(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "computation_error");
}

#[tokio::test]
async fn test_period_error_is_bad_request() {
    let (status, body) = render(PeriodError::MissingRange.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let (status, body) = render(AppError::Database("connection reset".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none());

    let (status, body) = render(AppError::Unavailable("timed out".to_string())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unavailable");
    assert!(body.get("details").is_none());
}

#[test]
fn test_only_unavailable_is_transient() {
    assert!(AppError::Unavailable("x".to_string()).is_transient());
    assert!(!AppError::Database("x".to_string()).is_transient());
    assert!(!AppError::NotFound("x".to_string()).is_transient());
    assert!(!AppError::InvalidToken.is_transient());
}
