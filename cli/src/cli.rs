use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use engine::{MonitorConfig, RetryPolicy};
use market::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierCli {
    /// notify-send popups
    Desktop,
    /// Log lines only
    Log,
}

#[derive(Debug, Parser)]
#[clap(name = "findicate", version, about = "Intraday stock alerts")]
pub struct Cli {
    /// Ticker symbol to watch
    #[clap(long, env = "FINDICATE_TICKER", default_value = "SPCE")]
    pub ticker: String,

    /// Unix timestamp history starts from (IPO close)
    #[clap(long, env = "FINDICATE_IPO_TIMESTAMP", default_value_t = 1_572_292_800)]
    pub ipo_timestamp: i64,

    /// Number of shares held
    #[clap(long, env = "FINDICATE_POSITION_SIZE", default_value_t = 451)]
    pub position_size: u64,

    /// Bootstrap, print the position value once and exit
    #[clap(long)]
    pub once: bool,

    /// Emit JSON logs (also enabled by APP_ENV=production)
    #[clap(long, env = "FINDICATE_JSON_LOGS")]
    pub json_logs: bool,

    /// Where alerts are delivered
    #[clap(long, value_enum, env = "FINDICATE_NOTIFIER", default_value = "desktop")]
    pub notifier: NotifierCli,

    /// Directory holding up.ico, down.ico and v.ico
    #[clap(long, env = "FINDICATE_ICON_DIR", default_value = "icons")]
    pub icon_dir: PathBuf,

    /// Where the bootstrap history snapshot is written
    #[clap(long, env = "FINDICATE_SNAPSHOT_DIR", default_value = "stocks")]
    pub snapshot_dir: PathBuf,

    /// Skip writing the history snapshot
    #[clap(long, env = "FINDICATE_NO_SNAPSHOT")]
    pub no_snapshot: bool,

    /// Seconds between aligned polls
    #[clap(long, env = "FINDICATE_POLL_SECS", default_value_t = 5)]
    pub poll_secs: u64,

    /// Per-request fetch timeout in seconds
    #[clap(long, env = "FINDICATE_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Tries per fetch before giving up, including the first
    #[clap(long, env = "FINDICATE_RETRY_ATTEMPTS", default_value_t = 5)]
    pub retry_attempts: u32,

    /// Backoff after the first failed fetch, doubled on each retry
    #[clap(long, env = "FINDICATE_RETRY_BASE_MS", default_value_t = 500)]
    pub retry_base_ms: u64,

    /// Upper bound on the backoff between retries
    #[clap(long, env = "FINDICATE_RETRY_MAX_MS", default_value_t = 30_000)]
    pub retry_max_ms: u64,

    /// Fail instead of rebuilding the session once retries run out
    #[clap(long, env = "FINDICATE_NO_RESET")]
    pub no_reset: bool,

    /// Currency the position value is shown in
    #[clap(long, env = "FINDICATE_CURRENCY", default_value = "GBP")]
    pub currency: String,

    /// Volume above which a spike is reported
    #[clap(long, env = "FINDICATE_VOLUME_CEILING", default_value_t = 15_000_000)]
    pub volume_ceiling: u64,
}

impl Cli {
    pub fn monitor_config(&self) -> MonitorConfig {
        let mut cfg = MonitorConfig::new(&self.ticker, self.ipo_timestamp, self.position_size);

        cfg.thresholds = Thresholds {
            volume_ceiling: self.volume_ceiling,
            ..Thresholds::default()
        };
        cfg.poll_interval = Duration::from_secs(self.poll_secs);
        cfg.fetch_timeout = Duration::from_secs(self.fetch_timeout_secs);
        cfg.retry = RetryPolicy {
            max_attempts: self.retry_attempts,
            base_delay: Duration::from_millis(self.retry_base_ms),
            max_delay: Duration::from_millis(self.retry_max_ms),
            reset_on_exhaustion: !self.no_reset,
        };
        cfg.display_currency = self.currency.to_uppercase();
        cfg.snapshot_dir = (!self.no_snapshot).then(|| self.snapshot_dir.clone());
        cfg.once = self.once;
        cfg
    }
}
