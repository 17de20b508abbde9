//! # History Service
//!
//! Business logic for the paginated, filtered exchange history.
//!
//! ## Pagination
//!
//! Fixed page size of 10, newest exchanges first. The response carries the
//! total count across all pages plus `next`/`previous` page numbers (null at
//! the edges). Requesting a page past the end is a 404, except page 1 of an
//! empty history, which is an empty page.
//!
//! ## Filters
//!
//! All filters combine with AND:
//!
//! - `currency_code` - exact match, case-insensitive
//! - `start_date` / `end_date` - `YYYY-MM-DD`, both inclusive for the whole day
//!
//! A start date after the end date is rejected before any query runs.

use chrono::NaiveDate;
use lib_core::dto::{ExchangeInfo, HistoryPage, HistoryQuery};
use lib_core::model::store::{ExchangeRepository, HistoryFilter};
use lib_core::{AppError, DbPool, Result};
use lib_utils::time::parse_date;

/// Number of records per history page.
pub const PAGE_SIZE: i64 = 10;

/// Service for querying exchange history.
pub struct HistoryService {
    pool: DbPool,
}

impl HistoryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of a user's exchange history.
    pub async fn list(&self, user_id: i64, query: &HistoryQuery) -> Result<HistoryPage> {
        let start_date = parse_date_param(query.start_date.as_deref(), "start_date")?;
        let end_date = parse_date_param(query.end_date.as_deref(), "end_date")?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::InvalidDateRange);
            }
        }

        let filter = HistoryFilter {
            currency_code: query
                .currency_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            start_date,
            end_date,
        };

        let page = parse_page_param(query.page.as_deref())?;

        let count = ExchangeRepository::count_for_user(&self.pool, user_id, &filter).await?;

        let offset = (page as i64 - 1) * PAGE_SIZE;

        // Page 1 of an empty result set is an empty page; anything past the
        // end is a 404.
        if page > 1 && offset >= count {
            return Err(AppError::NotFound("Invalid page".to_string()));
        }

        let records =
            ExchangeRepository::list_page(&self.pool, user_id, &filter, PAGE_SIZE, offset).await?;

        let next = if offset + PAGE_SIZE < count {
            Some(page + 1)
        } else {
            None
        };
        let previous = if page > 1 { Some(page - 1) } else { None };

        Ok(HistoryPage {
            count,
            next,
            previous,
            results: records.into_iter().map(ExchangeInfo::from).collect(),
        })
    }
}

/// Parse the `page` query parameter. Absent or empty means page 1; anything
/// that is not a positive integer is an invalid page.
fn parse_page_param(value: Option<&str>) -> Result<u32> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(1),
        Some(raw) => match raw.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(AppError::NotFound("Invalid page".to_string())),
        },
    }
}

/// Parse an optional `YYYY-MM-DD` query parameter. Empty strings count as
/// absent, so `?start_date=` behaves like no filter at all.
fn parse_date_param(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .map_err(|_| {
                AppError::InvalidInput(format!("{} must be a valid date (YYYY-MM-DD)", field))
            }),
    }
}
