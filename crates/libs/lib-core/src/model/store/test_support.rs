//! Shared setup for repository tests.

use super::DbPool;
use sqlx::sqlite::SqlitePoolOptions;

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
