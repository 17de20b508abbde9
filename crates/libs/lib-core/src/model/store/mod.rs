//! # Database Store
//!
//! Database connection pool and repository implementations.

// region: --- Modules
pub mod models;
pub mod user_repository;
pub mod balance_repository;
pub mod exchange_repository;

#[cfg(test)]
pub mod test_support;
// endregion: --- Modules

// region: --- Re-exports
pub use user_repository::UserRepository;
pub use balance_repository::BalanceRepository;
pub use exchange_repository::{ExchangeRepository, HistoryFilter};
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
