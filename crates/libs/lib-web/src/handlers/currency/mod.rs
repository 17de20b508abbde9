//! # Currency Handlers
//!
//! HTTP request handlers for the exchange-credit endpoints:
//!
//! - `GET /api/currency/balance` - the user's remaining credits
//! - `POST /api/currency` - spend one credit, record the current rate
//! - `GET /api/currency/history` - paginated, filtered exchange history
//!
//! All three require a Bearer token; the auth middleware injects `Claims`.
//! The handlers are thin: each parses the request, hands off to the matching
//! service, and lets [`AppError`]'s `IntoResponse` shape the error body.

use axum::{
    extract::{Extension, Json, Query, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{BalanceResponse, ExchangeInfo, ExchangeRequest, HistoryPage, HistoryQuery};
use lib_core::{AppError, DbPool};
use lib_rates::DynRateProvider;
use tracing::instrument;

use crate::services::{BalanceService, ExchangeService, HistoryService};

fn authenticated_user(claims: &Claims) -> Result<i64, AppError> {
    claims
        .user_id()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// `GET /api/currency/balance` - remaining exchange credits.
pub async fn get_balance(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<BalanceResponse>, AppError> {
    let user_id = authenticated_user(&claims)?;

    let response = BalanceService::new(pool).get(user_id).await?;
    Ok(Json(response))
}

/// `POST /api/currency` - exchange one credit for the current rate.
///
/// Returns 201 with the recorded exchange, or 400 with the exact message for
/// each failure mode (missing code, provider failure, unknown code,
/// insufficient balance).
#[instrument(skip(pool, rates, claims, req), fields(user = %claims.sub))]
pub async fn create_exchange(
    State(pool): State<DbPool>,
    State(rates): State<DynRateProvider>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ExchangeRequest>,
) -> Result<(StatusCode, Json<ExchangeInfo>), AppError> {
    let user_id = authenticated_user(&claims)?;

    let info = ExchangeService::new(pool, rates)
        .execute(user_id, req.currency_code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(info)))
}

/// `GET /api/currency/history` - one page of exchange history.
pub async fn get_history(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, AppError> {
    let user_id = authenticated_user(&claims)?;

    let page = HistoryService::new(pool).list(user_id, &query).await?;
    Ok(Json(page))
}
