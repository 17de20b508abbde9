//! # Rate Provider Errors
//!
//! Failures of the exchange-rate provider. The display strings double as the
//! client-facing error messages, so they are part of the API contract and
//! must not change casually.

use thiserror::Error;

/// Errors returned by the rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// No API key was configured for the provider.
    #[error("ExchangeRate API key not configured")]
    MissingApiKey,

    /// The provider did not answer within the request timeout.
    #[error("Exchange rate API timeout")]
    Timeout,

    /// Any other provider failure: non-success status, malformed payload, or
    /// transport error.
    #[error("Error fetching exchange rates")]
    Fetch,
}
