//! Poll loop for a single instrument.
//!
//! Each cycle: fetch the last 24h → update the series → recompute SMAs →
//! evaluate latches → dispatch alerts → sleep to the next aligned tick.
//! The controller owns the [`Session`] outright; nothing else mutates it.

use std::sync::Arc;

use common::logger::{TraceId, child_span, root_span};
use corelib::{
    CandleBatch, CurrencyConverter, MarketDataError, MarketDataProvider, NotificationSink,
    Resolution,
};
use session::store::SnapshotStore;
use session::{Session, TickReport};
use tracing::{Instrument, debug, error, info, warn};

use crate::clock::{Clock, until_next_tick};
use crate::config::MonitorConfig;
use crate::error::PollError;

const DAY_SECS: i64 = 86_400;

/// What a single poll cycle ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Evaluated {
        report: TickReport,
        emitted: usize,
        valuation: Option<f64>,
    },
    /// Provider answered but had nothing for the window.
    NoData,
    /// The candle was rejected: older than today, or a zero-price placeholder.
    Skipped,
}

pub struct PollController<P> {
    config: MonitorConfig,
    provider: P,
    sink: Arc<dyn NotificationSink>,
    fx: Arc<dyn CurrencyConverter>,
    store: Option<Arc<dyn SnapshotStore>>,
    clock: Arc<dyn Clock>,

    session: Option<Session>,
    resets: u32,
}

impl<P> PollController<P>
where
    P: MarketDataProvider,
{
    pub fn new(
        config: MonitorConfig,
        provider: P,
        sink: Arc<dyn NotificationSink>,
        fx: Arc<dyn CurrencyConverter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            provider,
            sink,
            fx,
            store: None,
            clock,
            session: None,
            resets: 0,
        }
    }

    pub fn with_snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Number of times the session was thrown away and rebuilt.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// Fetches the full history since the IPO and builds a fresh session.
    pub async fn start_session(&mut self) -> Result<(), PollError> {
        let span = child_span("bootstrap");
        async {
            let now = self.clock.now_unix();
            let history = self.fetch_with_retry(self.config.ipo_timestamp, now).await?;

            let session = Session::bootstrap(
                self.config.ticker.clone(),
                self.config.ipo_timestamp,
                &history,
                self.config.thresholds.clone(),
            )?;

            if let Some(store) = &self.store {
                if let Err(e) = store.save(session.ticker(), session.series()).await {
                    warn!(ticker = %self.config.ticker, error = ?e, "failed to persist series snapshot");
                }
            }

            self.session = Some(session);
            Ok::<(), PollError>(())
        }
        .instrument(span)
        .await
    }

    /// Drops every bit of session state and bootstraps again.
    pub async fn session_reset(&mut self) -> Result<(), PollError> {
        self.resets += 1;
        error!(
            ticker = %self.config.ticker,
            resets = self.resets,
            "session reset: refetching full history; latches and sent-alert memory are discarded"
        );
        self.session = None;
        self.start_session().await
    }

    /// One cycle under its own trace id. Bootstraps first if needed.
    pub async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let trace_id = TraceId::new();
        let span = root_span("poll_cycle", &trace_id);
        span.record("ticker", self.config.ticker.as_str());

        self.poll_cycle().instrument(span).await
    }

    async fn poll_cycle(&mut self) -> Result<PollOutcome, PollError> {
        if self.session.is_none() {
            self.start_session().await?;
        }

        let now = self.clock.now_unix();
        let batch = self.fetch_with_retry(now - DAY_SECS, now).await?;

        let Some(candle) = batch.candles.last().copied().filter(|_| batch.is_ok()) else {
            warn!(ticker = %self.config.ticker, status = ?batch.status, "no data for the last 24h; cycle skipped");
            return Ok(PollOutcome::NoData);
        };

        let Some(session) = self.session.as_mut() else {
            return Err(PollError::Fatal("session missing after bootstrap".into()));
        };

        let report = match session.ingest(candle) {
            Ok(r) => r,
            Err(e) => {
                warn!(ticker = %self.config.ticker, error = %e, "candle rejected; cycle skipped");
                return Ok(PollOutcome::Skipped);
            }
        };

        let valuation = value_position(self.fx.as_ref(), &self.config, report.close).await;
        if let Some(v) = valuation {
            session.record_valuation(v);
        }

        info!(
            ticker = %self.config.ticker,
            price = report.close,
            change_pct = report.reading.intraday_change_pct,
            range_move_pct = report.reading.range_move_pct,
            volume_m = report.volume as f64 / 1_000_000.0,
            long_ma = ?report.long_sma,
            short_ma = ?report.short_sma,
            value = ?valuation,
            currency = %self.config.display_currency,
            "status"
        );

        if self.config.once {
            return Ok(PollOutcome::Evaluated {
                report,
                emitted: 0,
                valuation,
            });
        }

        let alerts = session.evaluate(&report);
        let emitted = session.dispatch(&alerts, self.sink.as_ref(), self.config.display_seconds);
        if !alerts.is_empty() {
            debug!(raised = alerts.len(), emitted, "latches evaluated");
        }

        Ok(PollOutcome::Evaluated {
            report,
            emitted,
            valuation,
        })
    }

    /// Polls forever on the aligned cadence. Only returns on a failure the
    /// retry policy does not absorb.
    ///
    /// With `reset_on_exhaustion`, an outage never ends the loop: a failed
    /// reset leaves the controller without a session and the next cycle
    /// bootstraps again.
    pub async fn run(&mut self) -> Result<(), PollError> {
        info!(
            ticker = %self.config.ticker,
            every_ms = self.config.poll_interval.as_millis(),
            "poll loop started"
        );

        loop {
            match self.poll_once().await {
                Ok(_) => {}
                Err(PollError::RetriesExhausted { attempts, source })
                    if self.config.retry.reset_on_exhaustion =>
                {
                    warn!(attempts, error = %source, "retries exhausted");
                    if self.session.is_none() {
                        error!(
                            ticker = %self.config.ticker,
                            "still no session; bootstrapping again next tick"
                        );
                    } else {
                        self.reset_or_wait().await?;
                    }
                }
                Err(e) => return Err(e),
            }

            let wait = until_next_tick(self.clock.now_ms(), self.config.poll_interval);
            tokio::time::sleep(wait).await;
        }
    }

    /// Resets the session. A bootstrap that runs out of retries is logged
    /// and leaves the controller without a session.
    async fn reset_or_wait(&mut self) -> Result<(), PollError> {
        match self.session_reset().await {
            Ok(()) => Ok(()),
            Err(PollError::RetriesExhausted { attempts, source }) => {
                error!(
                    ticker = %self.config.ticker,
                    attempts,
                    error = %source,
                    "session reset could not bootstrap; retrying next tick"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Bootstrap, one poll, no alerts. Returns the converted position value.
    pub async fn run_once(&mut self) -> Result<Option<f64>, PollError> {
        self.config.once = true;
        match self.poll_once().await? {
            PollOutcome::Evaluated { valuation, .. } => Ok(valuation),
            PollOutcome::NoData | PollOutcome::Skipped => Ok(None),
        }
    }

    async fn fetch_with_retry(&self, from: i64, to: i64) -> Result<CandleBatch, PollError> {
        let policy = &self.config.retry;
        let attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            let fetch = self.provider.fetch_candles(
                &self.config.ticker,
                Resolution::Day,
                from,
                to,
            );
            let result = match tokio::time::timeout(self.config.fetch_timeout, fetch).await {
                Ok(r) => r,
                Err(_) => Err(MarketDataError::Timeout),
            };

            match result {
                Ok(batch) => return Ok(batch),
                Err(e) if attempt >= attempts => {
                    return Err(PollError::RetriesExhausted {
                        attempts,
                        source: e,
                    });
                }
                Err(e) => {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        ticker = %self.config.ticker,
                        attempt,
                        transient = e.is_transient(),
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

async fn value_position(
    fx: &dyn CurrencyConverter,
    config: &MonitorConfig,
    close: f64,
) -> Option<f64> {
    let amount = config.position_size as f64 * close;
    match fx
        .convert(amount, &config.quote_currency, &config.display_currency)
        .await
    {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(
                from = %config.quote_currency,
                to = %config.display_currency,
                error = ?e,
                "currency conversion failed; no valuation this cycle"
            );
            None
        }
    }
}
