//! # Balance Service
//!
//! Business logic for looking up a user's exchange-credit balance.

use lib_core::model::store::BalanceRepository;
use lib_core::{AppError, DbPool, Result};
use lib_core::dto::BalanceResponse;

/// Service for exchange-credit balance lookups.
pub struct BalanceService {
    pool: DbPool,
}

impl BalanceService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fetch the balance for a user.
    ///
    /// Returns `AppError::NotFound` if the user has no balance row. Balances
    /// are seeded at signup, so this only happens for accounts created
    /// outside the normal signup flow.
    pub async fn get(&self, user_id: i64) -> Result<BalanceResponse> {
        let balance = BalanceRepository::find_by_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Balance not found".to_string()))?;

        Ok(BalanceResponse {
            balance: balance.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;
    use lib_core::model::store::UserRepository;

    #[tokio::test]
    async fn test_get_balance_after_signup() {
        let pool = setup_test_db().await;
        let user = UserRepository::create(&pool, "alice", "alice@example.com", "hashed")
            .await
            .unwrap();

        let service = BalanceService::new(pool);
        let response = service.get(user.id).await.unwrap();

        assert_eq!(response.balance, 1000);
    }

    #[tokio::test]
    async fn test_get_balance_missing_row() {
        let pool = setup_test_db().await;

        let service = BalanceService::new(pool);
        let result = service.get(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
