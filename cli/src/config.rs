use std::time::Duration;

use adapters::finnhub::client::DEFAULT_BASE_URL;
use adapters::fx::DEFAULT_FX_BASE_URL;
use anyhow::{Context, Result};

/// Provider settings that only come from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub finnhub_api_key: String,
    pub finnhub_base_url: String,
    pub fx_base_url: String,

    /// How long a fetched exchange rate is reused.
    pub fx_cache_ttl: Duration,

    /// `APP_ENV=production` switches logs to JSON.
    pub is_production: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let finnhub_api_key =
            std::env::var("FINNHUB_API_KEY").context("FINNHUB_API_KEY must be set")?;

        let finnhub_base_url =
            std::env::var("FINNHUB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let fx_base_url =
            std::env::var("FX_BASE_URL").unwrap_or_else(|_| DEFAULT_FX_BASE_URL.to_string());

        Ok(Self {
            finnhub_api_key,
            finnhub_base_url,
            fx_base_url,
            fx_cache_ttl: Duration::from_secs(60 * 60),
            is_production: std::env::var("APP_ENV").unwrap_or_default() == "production",
        })
    }
}
