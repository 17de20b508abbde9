//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! so the service fails fast if misconfigured.
//!
//! There is no process-wide configuration instance: the loaded `Config` is
//! owned by the application state and passed explicitly to whatever needs it
//! (rate provider adapter included).

use crate::error::AppError;
use lib_utils::envs::{get_env, get_env_or, get_env_parse};

/// Default base URL of the exchange-rate provider.
pub const DEFAULT_RATES_BASE_URL: &str = "https://v6.exchangerate-api.com";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// After this period, users must re-authenticate.
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// API key for the exchange-rate provider
    pub rates_api_key: String,

    /// Base URL of the exchange-rate provider
    pub rates_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/ratebook.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|_| {
            AppError::Config("JWT_SECRET must be set in environment".to_string())
        })?;

        let jwt_expiration_hours = match get_env("JWT_EXPIRATION_HOURS") {
            Ok(_) => get_env_parse("JWT_EXPIRATION_HOURS").map_err(|e| {
                AppError::Config(format!("JWT_EXPIRATION_HOURS must be a valid number: {}", e))
            })?,
            Err(_) => 24,
        };

        // The rate provider checks the key at call time and reports a
        // provider error, mirroring how a missing key surfaces to clients.
        let rates_api_key = get_env_or("EXCHANGE_RATE_API_KEY", "");
        let rates_base_url = get_env_or("EXCHANGE_RATE_BASE_URL", DEFAULT_RATES_BASE_URL);

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            rates_api_key,
            rates_base_url,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        Ok(())
    }
}
