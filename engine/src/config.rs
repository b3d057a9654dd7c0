use std::path::PathBuf;
use std::time::Duration;

use market::Thresholds;

/// Bounded retry around a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total tries including the first one. Zero is treated as one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,

    /// Re-bootstrap the whole session once retries run out, instead of
    /// failing. Latches and the dedup cache are lost when this happens.
    pub reset_on_exhaustion: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            reset_on_exhaustion: true,
        }
    }
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay after the `attempt`-th failure (1-based): `base * 2^(attempt-1)`,
    /// capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exp)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub ticker: String,
    pub ipo_timestamp: i64,
    pub position_size: u64,

    pub thresholds: Thresholds,

    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
    pub retry: RetryPolicy,

    /// Currency the provider quotes in.
    pub quote_currency: String,
    /// Currency the position value is reported in.
    pub display_currency: String,

    /// Where the bootstrap series snapshot goes. `None` disables it.
    pub snapshot_dir: Option<PathBuf>,

    pub display_seconds: u32,

    /// Bootstrap, value the position once and stop. No alerts.
    pub once: bool,
}

impl MonitorConfig {
    pub fn new(ticker: impl Into<String>, ipo_timestamp: i64, position_size: u64) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            ipo_timestamp,
            position_size,
            thresholds: Thresholds::default(),
            poll_interval: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            quote_currency: "USD".to_string(),
            display_currency: "GBP".to_string(),
            snapshot_dir: None,
            display_seconds: 20,
            once: false,
        }
    }
}
