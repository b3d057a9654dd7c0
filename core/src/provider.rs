use async_trait::async_trait;

use crate::error::MarketDataError;
use crate::models::{CandleBatch, Notification, Resolution};

/// Source of OHLCV candles for a single ticker.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_candles(
        &self,
        ticker: &str,
        resolution: Resolution,
        from_unix: i64,
        to_unix: i64,
    ) -> Result<CandleBatch, MarketDataError>;
}

/// Where alerts end up. Fire-and-forget: delivery is not acknowledged.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Converts a monetary amount between ISO currency codes.
#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> anyhow::Result<f64>;
}
