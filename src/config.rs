// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup. Secrets (the JWT key shared with the identity
//! provider) are injected into the environment by the deployment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which backing store serves the data-access contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    /// Process-local store for development and tests
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StorageBackend::Firestore),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND", s.to_string())),
        }
    }
}

/// Retry and timeout settings for store calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: u32,
    /// Limit on a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            backoff_multiplier: 2,
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub retry: RetryPolicy,

    /// HS256 key shared with the identity provider (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Expected `aud` claim, if the provider sets one
    pub jwt_audience: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = RetryPolicy::default();

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_var("PORT", 8080)?,
            storage_backend: env::var("STORAGE_BACKEND")
                .map(|v| v.parse())
                .unwrap_or(Ok(StorageBackend::Firestore))?,
            retry: RetryPolicy {
                max_attempts: parse_var("RETRY_MAX_ATTEMPTS", defaults.max_attempts)?.max(1),
                initial_delay: Duration::from_millis(parse_var(
                    "RETRY_INITIAL_DELAY_MS",
                    defaults.initial_delay.as_millis() as u64,
                )?),
                backoff_multiplier: parse_var(
                    "RETRY_BACKOFF_MULTIPLIER",
                    defaults.backoff_multiplier,
                )?,
                attempt_timeout: Duration::from_millis(parse_var(
                    "STORE_TIMEOUT_MS",
                    defaults.attempt_timeout.as_millis() as u64,
                )?),
            },

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            jwt_audience: env::var("JWT_AUDIENCE")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Deterministic configuration for tests: in-memory store, fast retries.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage_backend: StorageBackend::Memory,
            retry: RetryPolicy {
                max_attempts: 3,
                initial_delay: Duration::from_millis(1),
                backoff_multiplier: 2,
                attempt_timeout: Duration::from_secs(5),
            },
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            jwt_audience: None,
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
