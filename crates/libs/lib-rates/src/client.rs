//! # Exchange Rate HTTP Client
//!
//! HTTP client for the ExchangeRate API (`/v6/{key}/latest/USD`). One request
//! fetches the full USD conversion table; the requested code is looked up in
//! it, uppercased, matching how the API keys its `conversion_rates` map.

use crate::error::RateError;
use crate::RateProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout for the provider.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the rate provider, passed at construction time.
#[derive(Debug, Clone)]
pub struct RatesConfig {
    /// ExchangeRate API key. An empty key is reported as a provider error on
    /// the first call rather than at startup.
    pub api_key: String,
    /// Base URL, e.g. `https://v6.exchangerate-api.com`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl RatesConfig {
    /// Create a config with the default timeout.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Response payload of the `latest` endpoint.
///
/// Only `conversion_rates` matters; a payload without it is treated as a
/// fetch failure.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    conversion_rates: HashMap<String, f64>,
}

/// HTTP client for the ExchangeRate API.
pub struct RateClient {
    http: Client,
    config: RatesConfig,
}

impl RateClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RatesConfig) -> Result<Self, RateError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {}", e);
                RateError::Fetch
            })?;

        Ok(Self { http, config })
    }

    fn latest_url(&self) -> String {
        format!(
            "{}/v6/{}/latest/USD",
            self.config.base_url, self.config.api_key
        )
    }
}

#[async_trait]
impl RateProvider for RateClient {
    async fn get_rate(&self, currency_code: &str) -> Result<Option<f64>, RateError> {
        if self.config.api_key.is_empty() {
            return Err(RateError::MissingApiKey);
        }

        debug!("Fetching exchange rates for lookup of {}", currency_code);

        let response = self.http.get(self.latest_url()).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Exchange rate request timed out");
                RateError::Timeout
            } else {
                warn!("Exchange rate request failed: {}", e);
                RateError::Fetch
            }
        })?;

        if !response.status().is_success() {
            warn!("Exchange rate API returned status {}", response.status());
            return Err(RateError::Fetch);
        }

        let body: RatesResponse = response.json().await.map_err(|e| {
            warn!("Exchange rate payload parse failed: {}", e);
            RateError::Fetch
        })?;

        Ok(body
            .conversion_rates
            .get(&currency_code.to_uppercase())
            .copied())
    }
}
