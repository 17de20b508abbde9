//! # Exchange Rate Provider
//!
//! Adapter for the external exchange-rate API.
//!
//! The provider is consumed through the [`RateProvider`] trait: given a
//! currency code it returns the current rate against USD, `None` for codes
//! the provider does not know, or a [`RateError`] whose display string is the
//! exact message surfaced to API clients.
//!
//! Configuration is an explicit [`RatesConfig`] handed to the client at
//! construction time; nothing here reads the environment.

pub mod client;
pub mod error;

pub use client::{RateClient, RatesConfig};
pub use error::RateError;

use async_trait::async_trait;
use std::sync::Arc;

/// Source of currency exchange rates.
///
/// Implemented by [`RateClient`] for the real API and by mocks in tests.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the rate for a currency code (case-insensitive).
    ///
    /// # Returns
    ///
    /// * `Ok(Some(rate))` - Provider knows the code
    /// * `Ok(None)` - Provider does not know the code
    /// * `Err(RateError)` - Timeout, configuration, or transport failure
    async fn get_rate(&self, currency_code: &str) -> Result<Option<f64>, RateError>;
}

/// Shared, object-safe handle to a rate provider.
pub type DynRateProvider = Arc<dyn RateProvider>;
