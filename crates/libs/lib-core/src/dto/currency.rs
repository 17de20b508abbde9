//! # Currency Exchange Data Transfer Objects
//!
//! Request and response structures for the balance, exchange, and history
//! endpoints.
//!
//! ## Wire Format
//!
//! A successful exchange (`POST /api/currency`) returns 201 with:
//!
//! ```json
//! {
//!   "currency_code": "USD",
//!   "rate": 1.0,
//!   "created_at": "2025-03-25T12:34:56Z"
//! }
//! ```
//!
//! The history endpoint returns a page:
//!
//! ```json
//! {
//!   "count": 15,
//!   "next": 2,
//!   "previous": null,
//!   "results": [ { "currency_code": "USD", "rate": 1.0, "created_at": "..." } ]
//! }
//! ```

use crate::model::store::models::CurrencyExchange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exchange request body.
///
/// `currency_code` is optional at the serde level so the handler can return
/// the exact "currency_code is required" error instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub currency_code: Option<String>,
}

/// One completed exchange as exposed to clients.
///
/// `rate` is always a plain float on the wire regardless of storage
/// precision; `created_at` serializes as RFC3339.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeInfo {
    pub currency_code: String,
    pub rate: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CurrencyExchange> for ExchangeInfo {
    fn from(record: CurrencyExchange) -> Self {
        Self {
            currency_code: record.currency_code,
            rate: record.rate,
            created_at: record.created_at,
        }
    }
}

/// Balance lookup response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceResponse {
    pub balance: i64,
}

/// Query parameters for the history endpoint.
///
/// Dates and the page number arrive as raw strings so empty query values
/// (`?start_date=`) are tolerated and malformed values produce the same
/// `{"error": ...}` body as every other failure, not an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub currency_code: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
}

/// One page of exchange history, newest first.
///
/// `next`/`previous` are page numbers, or null at the edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryPage {
    pub count: i64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<ExchangeInfo>,
}
