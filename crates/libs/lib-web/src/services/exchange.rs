//! # Exchange Service
//!
//! Business logic for the exchange transaction: spend one exchange credit
//! and record the current rate for a currency.
//!
//! ## Transaction Shape
//!
//! The rate lookup happens first, outside the database transaction. The
//! balance decrement and the history insert then run inside one transaction,
//! so a user's balance never drops without a matching record and a record is
//! never written without payment. The decrement is a conditional `UPDATE`
//! guarded by `balance > 0`, which makes concurrent spends of the last credit
//! race safely: exactly one wins.
//!
//! ## Validation Order
//!
//! 1. Missing or blank `currency_code` -> "currency_code is required"
//! 2. Provider failure -> provider's message, verbatim
//! 3. Unknown code -> "Invalid currency code"
//! 4. No credits left -> "Insufficient balance"

use lib_core::dto::ExchangeInfo;
use lib_core::model::store::{BalanceRepository, ExchangeRepository};
use lib_core::{AppError, DbPool, Result};
use lib_rates::DynRateProvider;
use tracing::{debug, info};

/// Service for executing exchange transactions.
pub struct ExchangeService {
    pool: DbPool,
    rates: DynRateProvider,
}

impl ExchangeService {
    pub fn new(pool: DbPool, rates: DynRateProvider) -> Self {
        Self { pool, rates }
    }

    /// Execute an exchange for the given user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated user
    /// * `currency_code` - Requested code as it arrived in the request body
    ///
    /// # Returns
    ///
    /// The recorded exchange on success, or an `AppError` carrying the exact
    /// client-facing message for each failure mode.
    pub async fn execute(
        &self,
        user_id: i64,
        currency_code: Option<&str>,
    ) -> Result<ExchangeInfo> {
        let code = currency_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::MissingInput("currency_code is required".to_string()))?;

        debug!("[EXCHANGE] Fetching rate for {} (user {})", code, user_id);

        let rate = self
            .rates
            .get_rate(code)
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?
            .ok_or(AppError::UnknownCurrency)?;

        let mut tx = self.pool.begin().await?;

        if !BalanceRepository::try_decrement(&mut *tx, user_id).await? {
            return Err(AppError::InsufficientBalance);
        }

        let record = ExchangeRepository::insert(&mut *tx, user_id, code, rate).await?;

        tx.commit().await?;

        info!(
            "[EXCHANGE] User {} exchanged 1 credit for {} @ {}",
            user_id, record.currency_code, record.rate
        );

        Ok(ExchangeInfo::from(record))
    }
}
