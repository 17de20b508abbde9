//! # Exchange Repository
//!
//! Database access layer for currency exchange records.
//!
//! Records are append-only: this repository exposes an insert (used inside
//! the exchange transaction) and read paths for the history query, but no
//! update or delete. History reads are always scoped to one user and ordered
//! newest first. Filtering is assembled by an explicit predicate builder from
//! the options in [`HistoryFilter`].

use super::models::CurrencyExchange;
use super::DbPool;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use lib_utils::time::now_utc;
use sqlx::{query_as, SqliteConnection};

/// Optional, AND-combined filters for the history query.
///
/// `currency_code` matches case-insensitively; the dates are inclusive
/// calendar-day bounds on `created_at`.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub currency_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Lower bound on `created_at`: midnight at the start of `start_date`.
    fn start_bound(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Exclusive upper bound on `created_at`: midnight after `end_date`,
    /// which makes the whole end day inclusive.
    fn end_bound(&self) -> Option<DateTime<Utc>> {
        self.end_date.map(|d| {
            d.checked_add_days(Days::new(1))
                .unwrap_or(d)
                .and_time(NaiveTime::MIN)
                .and_utc()
        })
    }

    /// Build the WHERE clause for this filter. Bind order: user_id, then the
    /// present filters in declaration order.
    fn where_sql(&self) -> String {
        let mut sql = String::from("WHERE user_id = ?");
        if self.currency_code.is_some() {
            sql.push_str(" AND UPPER(currency_code) = ?");
        }
        if self.start_date.is_some() {
            sql.push_str(" AND created_at >= ?");
        }
        if self.end_date.is_some() {
            sql.push_str(" AND created_at < ?");
        }
        sql
    }
}

/// Exchange record repository for database operations.
pub struct ExchangeRepository;

impl ExchangeRepository {
    /// Insert a new exchange record.
    ///
    /// The currency code is normalized to uppercase and `created_at` is
    /// stamped here. Takes a connection so the exchange transaction can run
    /// the insert on the same transaction as the balance decrement.
    pub async fn insert(
        conn: &mut SqliteConnection,
        user_id: i64,
        currency_code: &str,
        rate: f64,
    ) -> Result<CurrencyExchange, sqlx::Error> {
        let created_at = now_utc();

        let result = sqlx::query(
            "INSERT INTO currency_exchanges (user_id, currency_code, rate, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(currency_code.to_uppercase())
        .bind(rate)
        .bind(created_at)
        .execute(&mut *conn)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, CurrencyExchange>("SELECT * FROM currency_exchanges WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Count a user's exchange records matching the filter.
    pub async fn count_for_user(
        pool: &DbPool,
        user_id: i64,
        filter: &HistoryFilter,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COUNT(*) FROM currency_exchanges {}",
            filter.where_sql()
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(user_id);

        if let Some(ref code) = filter.currency_code {
            query = query.bind(code.to_uppercase());
        }
        if let Some(start) = filter.start_bound() {
            query = query.bind(start);
        }
        if let Some(end) = filter.end_bound() {
            query = query.bind(end);
        }

        query.fetch_one(pool).await
    }

    /// Fetch one page of a user's exchange records matching the filter,
    /// ordered by `created_at` descending (newest first).
    pub async fn list_page(
        pool: &DbPool,
        user_id: i64,
        filter: &HistoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CurrencyExchange>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM currency_exchanges {}
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            filter.where_sql()
        );

        let mut query = query_as::<_, CurrencyExchange>(&sql).bind(user_id);

        if let Some(ref code) = filter.currency_code {
            query = query.bind(code.to_uppercase());
        }
        if let Some(start) = filter.start_bound() {
            query = query.bind(start);
        }
        if let Some(end) = filter.end_bound() {
            query = query.bind(end);
        }

        query.bind(limit).bind(offset).fetch_all(pool).await
    }
}
