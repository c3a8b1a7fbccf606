// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fuel-Tracker API Server
//!
//! Records fill-ups per vehicle and serves consumption and cost statistics.

use fuel_tracker::{
    config::Config,
    db::{Backend, RetryingStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = ?config.storage_backend,
        "Starting Fuel-Tracker API"
    );

    let backend = Backend::connect(&config).await?;
    let db = RetryingStore::new(backend, config.retry.clone());
    tracing::info!(
        max_attempts = config.retry.max_attempts,
        timeout_ms = config.retry.attempt_timeout.as_millis() as u64,
        "Store initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    let app = fuel_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fuel_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
