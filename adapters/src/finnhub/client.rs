use std::time::Duration;

use async_trait::async_trait;
use corelib::{CandleBatch, MarketDataError, MarketDataProvider, Resolution};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::finnhub::errors::FinnhubError;
use crate::finnhub::types::CandleEnvelope;

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

#[derive(Clone)]
pub struct FinnhubClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, FinnhubError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[instrument(
        skip(self),
        fields(ticker = %ticker, resolution = %resolution),
        level = "debug"
    )]
    pub async fn fetch(
        &self,
        ticker: &str,
        resolution: Resolution,
        from_unix: i64,
        to_unix: i64,
    ) -> Result<CandleBatch, FinnhubError> {
        let url = format!("{}/stock/candle", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("symbol", ticker.to_uppercase()),
                ("resolution", resolution.to_string()),
                ("from", from_unix.to_string()),
                ("to", to_unix.to_string()),
            ])
            .header("X-Finnhub-Token", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FinnhubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: CandleEnvelope = resp.json().await?;
        let batch = envelope.into_batch()?;

        debug!(
            status = ?batch.status,
            candles = batch.candles.len(),
            "finnhub candles fetched"
        );

        Ok(batch)
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn fetch_candles(
        &self,
        ticker: &str,
        resolution: Resolution,
        from_unix: i64,
        to_unix: i64,
    ) -> Result<CandleBatch, MarketDataError> {
        self.fetch(ticker, resolution, from_unix, to_unix)
            .await
            .map_err(MarketDataError::from)
    }
}
