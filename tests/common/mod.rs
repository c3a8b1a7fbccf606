// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fuel_tracker::config::Config;
use fuel_tracker::db::{Backend, FirestoreDb, MemoryDb, RetryingStore};
use fuel_tracker::routes::create_router;
use fuel_tracker::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = RetryingStore::new(Backend::Memory(MemoryDb::new()), config.retry.clone());

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Create a test app whose store is offline; every store call fails.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = RetryingStore::new(Backend::Firestore(FirestoreDb::new_mock()), config.retry.clone());

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
        email: String,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
        email: format!("{}@example.com", user_id),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Send a request as `token` and return the status and parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Create a vehicle and return its ID.
#[allow(dead_code)]
pub async fn create_vehicle(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/vehicles",
        token,
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "vehicle create failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Create a fill-up and return the response status and body.
#[allow(dead_code)]
pub async fn create_entry(
    app: &Router,
    token: &str,
    vehicle_id: &str,
    date: &str,
    odometer: i64,
    liters: f64,
    total: f64,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/entries",
        token,
        Some(serde_json::json!({
            "vehicle_id": vehicle_id,
            "entry_date": date,
            "odometer": odometer,
            "station": "Main St",
            "brand": "Shell",
            "grade": "95",
            "liters": liters,
            "total": total,
        })),
    )
    .await
}
