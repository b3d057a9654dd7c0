use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use corelib::CurrencyConverter;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_FX_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

/// ECB reference rates from the Frankfurter API, cached per pair for `ttl`.
pub struct FrankfurterConverter {
    http: Client,
    base_url: String,
    ttl: Duration,
    cache: Mutex<HashMap<(String, String), (f64, Instant)>>,
}

impl FrankfurterConverter {
    pub fn new(base_url: String, timeout: Duration, ttl: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build fx http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn cached(&self, key: &(String, String)) -> Option<f64> {
        let cache = self.cache.lock();
        cache
            .get(key)
            .filter(|(_, fetched_at)| fetched_at.elapsed() < self.ttl)
            .map(|(rate, _)| *rate)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn rate(&self, from: &str, to: &str) -> anyhow::Result<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return Ok(1.0);
        }

        let key = (from.clone(), to.clone());
        if let Some(rate) = self.cached(&key) {
            return Ok(rate);
        }

        let url = format!("{}/latest", self.base_url);
        let body: LatestRates = self
            .http
            .get(&url)
            .query(&[("from", from.as_str()), ("to", to.as_str())])
            .send()
            .await
            .context("fx request failed")?
            .error_for_status()
            .context("fx endpoint returned an error status")?
            .json()
            .await
            .context("failed to decode fx response")?;

        let rate = *body
            .rates
            .get(&to)
            .ok_or_else(|| anyhow!("no {to} rate in fx response"))?;

        debug!(%from, %to, rate, "fx rate refreshed");
        self.cache.lock().insert(key, (rate, Instant::now()));
        Ok(rate)
    }
}

#[async_trait]
impl CurrencyConverter for FrankfurterConverter {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> anyhow::Result<f64> {
        Ok(amount * self.rate(from, to).await?)
    }
}
