//! # Balance Repository
//!
//! Database access layer for per-user exchange-credit balances.
//!
//! The balance row is created once at registration and only ever mutated by
//! [`BalanceRepository::try_decrement`], a conditional single-row UPDATE that
//! is the serialization point for concurrent exchanges: the balance check and
//! the decrement are one statement, so two transactions can never both
//! observe a positive balance and push it below zero.

use super::models::UserBalance;
use super::DbPool;
use sqlx::{query_as, SqliteConnection};

/// Balance seeded for every new account.
pub const INITIAL_BALANCE: i64 = 1000;

/// Balance repository for database operations.
pub struct BalanceRepository;

impl BalanceRepository {
    /// Find the balance row for a user.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(UserBalance))` - Balance row exists
    /// * `Ok(None)` - No balance row for that user (lookup never creates one)
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_user(pool: &DbPool, user_id: i64) -> Result<Option<UserBalance>, sqlx::Error> {
        query_as::<_, UserBalance>("SELECT user_id, balance FROM user_balances WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert the initial balance row for a user.
    ///
    /// Takes a connection rather than the pool so callers can run it inside
    /// the same transaction that creates the user row.
    pub async fn seed(
        conn: &mut SqliteConnection,
        user_id: i64,
        balance: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_balances (user_id, balance) VALUES (?, ?)")
            .bind(user_id)
            .bind(balance)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Atomically deduct one credit if the balance is positive.
    ///
    /// Returns `true` when a credit was deducted, `false` when the balance is
    /// zero or the row does not exist. Intended to run inside the exchange
    /// transaction, on the transaction's connection.
    pub async fn try_decrement(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_balances SET balance = balance - 1 WHERE user_id = ? AND balance > 0",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_support::setup_test_db;
    use crate::model::store::UserRepository;

    #[tokio::test]
    async fn test_find_by_user_absent() {
        let pool = setup_test_db().await;

        let found = BalanceRepository::find_by_user(&pool, 42).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_try_decrement_deducts_one() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, "alice", "alice@example.com", "hashed")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let deducted = BalanceRepository::try_decrement(&mut conn, user.id)
            .await
            .unwrap();
        drop(conn);

        assert!(deducted);

        let balance = BalanceRepository::find_by_user(&pool, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.balance, INITIAL_BALANCE - 1);
    }

    #[tokio::test]
    async fn test_try_decrement_refuses_at_zero() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, "alice", "alice@example.com", "hashed")
            .await
            .unwrap();

        sqlx::query("UPDATE user_balances SET balance = 0 WHERE user_id = ?")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let deducted = BalanceRepository::try_decrement(&mut conn, user.id)
            .await
            .unwrap();
        drop(conn);

        assert!(!deducted);

        let balance = BalanceRepository::find_by_user(&pool, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.balance, 0);
    }

    #[tokio::test]
    async fn test_try_decrement_missing_row() {
        let pool = setup_test_db().await;

        let mut conn = pool.acquire().await.unwrap();
        let deducted = BalanceRepository::try_decrement(&mut conn, 42).await.unwrap();

        assert!(!deducted);
    }

    #[tokio::test]
    async fn test_balance_drains_to_zero() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, "alice", "alice@example.com", "hashed")
            .await
            .unwrap();

        sqlx::query("UPDATE user_balances SET balance = 2 WHERE user_id = ?")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        assert!(BalanceRepository::try_decrement(&mut conn, user.id).await.unwrap());
        assert!(BalanceRepository::try_decrement(&mut conn, user.id).await.unwrap());
        assert!(!BalanceRepository::try_decrement(&mut conn, user.id).await.unwrap());
        drop(conn);

        let balance = BalanceRepository::find_by_user(&pool, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.balance, 0);
    }
}
