// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fuel-Tracker: fill-up logging and fuel consumption statistics
//!
//! This crate provides the backend API for recording fuel purchases per
//! vehicle and deriving consumption, cost and period statistics from them.

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
