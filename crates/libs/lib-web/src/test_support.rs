//! Shared fixtures for handler and service tests: an in-memory database with
//! the full schema, a test configuration, and a scriptable rate provider.

use crate::server::{create_router, AppState};
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use lib_core::{Config, DbPool};
use lib_rates::{DynRateProvider, RateError, RateProvider};
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// JWT secret used by handler tests. Long enough to pass validation.
pub const TEST_JWT_SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

/// Create an in-memory SQLite database with the full schema.
///
/// A single connection is used so every query in the test sees the same
/// in-memory database.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_login TIMESTAMP,
            is_active BOOLEAN NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_balances (
            user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            balance INTEGER NOT NULL DEFAULT 1000 CHECK (balance >= 0)
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create user_balances table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS currency_exchanges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            currency_code TEXT NOT NULL,
            rate REAL NOT NULL,
            created_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create currency_exchanges table");

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_currency_exchanges_user_created
         ON currency_exchanges (user_id, created_at)",
    )
    .execute(&pool)
    .await
    .expect("Failed to create history index");

    pool
}

/// A test configuration that never touches the environment.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 24,
        rates_api_key: "test-api-key".to_string(),
        rates_base_url: "http://localhost:9".to_string(),
    }
}

/// Scriptable rate provider for tests.
///
/// Knows a fixed set of currency codes, or fails every call with a
/// preconfigured error.
pub struct MockRates {
    rates: HashMap<String, f64>,
    failure: Option<RateError>,
}

impl MockRates {
    /// A provider that knows exactly the given codes.
    pub fn with_rates(pairs: &[(&str, f64)]) -> DynRateProvider {
        Arc::new(Self {
            rates: pairs
                .iter()
                .map(|(code, rate)| (code.to_uppercase(), *rate))
                .collect(),
            failure: None,
        })
    }

    /// A provider that knows no currency codes at all.
    pub fn empty() -> DynRateProvider {
        Self::with_rates(&[])
    }

    /// A provider that fails every call with the given error.
    pub fn failing(error: RateError) -> DynRateProvider {
        Arc::new(Self {
            rates: HashMap::new(),
            failure: Some(error),
        })
    }
}

#[async_trait]
impl RateProvider for MockRates {
    async fn get_rate(&self, currency_code: &str) -> Result<Option<f64>, RateError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.rates.get(&currency_code.to_uppercase()).copied())
    }
}

/// Build the full application router around a test database and a mock
/// rate provider, middleware included.
pub fn test_app(pool: DbPool, rates: DynRateProvider) -> Router {
    let state = AppState {
        db: pool,
        config: test_config(),
        rates,
    };
    create_router(state, Vec::new())
}

/// A `Bearer` header value for the given user, signed with the test secret.
pub fn auth_header(user_id: i64, username: &str) -> String {
    let token = lib_auth::encode_jwt(user_id, username.to_string(), TEST_JWT_SECRET, 24)
        .expect("JWT encoding should succeed");
    format!("Bearer {}", token)
}

/// Build a request with optional auth header and JSON body.
pub fn json_request(
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

/// Collect a response body as JSON.
pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body should be JSON")
}
