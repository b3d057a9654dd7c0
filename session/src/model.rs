use chrono::NaiveDate;
use corelib::{Candle, CandleBatch, NotificationSink};
use market::pulse::{MoveDetector, MoveReading};
use market::{
    MovingAverage, SeriesError, SeriesStore, SmaError, ThresholdError, Thresholds, Upsert,
    compute_sma,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::alert::Alert;
use crate::dedup::NotificationDeduper;
use crate::latches::{AnomalyLatches, CrossoverInput};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no usable history returned for {0}")]
    NoHistory(String),

    #[error("candle for {date} has non-positive prices")]
    InvalidCandle { date: NaiveDate },

    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Sma(#[from] SmaError),
}

/// Reference values captured once at bootstrap, as of the last closed day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub long_sma: Option<f64>,
    pub short_sma: Option<f64>,
    pub avg_volume: f64,
}

/// What one poll observed, before any latch is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub short_sma: Option<f64>,
    pub long_sma: Option<f64>,
    pub reading: MoveReading,

    /// True when this poll started a new trading day.
    pub new_day: bool,
}

/// Monitoring session for one instrument.
///
/// Owns the series, indicator engines and the alert state (latches and
/// dedup cache). All of it lives exactly as long as the session value;
/// nothing is persisted except the series snapshot.
#[derive(Debug)]
pub struct Session {
    ticker: String,
    ipo_timestamp: i64,

    series: SeriesStore,
    baseline: Baseline,
    short_ma: MovingAverage,
    long_ma: MovingAverage,

    thresholds: Thresholds,
    detector: MoveDetector,

    latches: AnomalyLatches,
    deduper: NotificationDeduper,

    /// Converted position value after each evaluated poll.
    valuations: Vec<f64>,
}

impl Session {
    /// Builds a session from the full history fetch. The last candle of
    /// `history` is the in-progress day and is left out of the series and
    /// the baselines.
    pub fn bootstrap(
        ticker: impl Into<String>,
        ipo_timestamp: i64,
        history: &CandleBatch,
        thresholds: Thresholds,
    ) -> Result<Self, SessionError> {
        let ticker = ticker.into();
        thresholds.validate()?;

        if !history.is_ok() {
            return Err(SessionError::NoHistory(ticker));
        }

        let candles: Vec<Candle> = history
            .candles
            .iter()
            .copied()
            .filter(Candle::has_positive_prices)
            .collect();
        let dropped = history.candles.len() - candles.len();
        if dropped > 0 {
            warn!(ticker = %ticker, dropped, "placeholder candles left out of history");
        }
        if candles.is_empty() {
            return Err(SessionError::NoHistory(ticker));
        }

        let series = SeriesStore::from_history(&candles[..candles.len() - 1]);
        let closed = series.closed_closes();

        let long_sma = compute_sma(&closed, thresholds.long_window).ok();
        let short_sma = compute_sma(&closed, thresholds.short_window).ok();
        if long_sma.is_none() || short_sma.is_none() {
            warn!(
                ticker = %ticker,
                closed_days = closed.len(),
                long_window = thresholds.long_window,
                "not enough history for baseline SMAs; crossover detection disabled"
            );
        }

        let total_volume: f64 = candles.iter().map(|c| c.volume as f64).sum();
        let avg_volume = total_volume / candles.len() as f64;

        let baseline = Baseline {
            long_sma,
            short_sma,
            avg_volume,
        };

        info!(
            ticker = %ticker,
            days = series.len(),
            long_sma = ?baseline.long_sma,
            short_sma = ?baseline.short_sma,
            avg_volume = baseline.avg_volume,
            "session bootstrapped"
        );

        Ok(Self {
            short_ma: MovingAverage::seeded(thresholds.short_window, &closed)?,
            long_ma: MovingAverage::seeded(thresholds.long_window, &closed)?,
            detector: MoveDetector::new(thresholds.move_tiers_pct),
            ticker,
            ipo_timestamp,
            series,
            baseline,
            thresholds,
            latches: AnomalyLatches::new(),
            deduper: NotificationDeduper::new(),
            valuations: Vec::new(),
        })
    }

    /// Writes today's candle and recomputes indicators. No alert state
    /// changes here.
    pub fn ingest(&mut self, candle: Candle) -> Result<TickReport, SessionError> {
        if !candle.has_positive_prices() {
            return Err(SessionError::InvalidCandle {
                date: candle.date(),
            });
        }

        let upsert = self.series.upsert_today(candle)?;

        let new_day = match upsert {
            Upsert::Replaced => false,
            Upsert::Appended { closed } => {
                if let Some(prev) = closed {
                    debug!(ticker = %self.ticker, date = %prev.date(), close = prev.close, "day closed");
                    self.short_ma.push_closed(prev.close);
                    self.long_ma.push_closed(prev.close);
                }
                true
            }
        };

        let previous_close = self.series.last_closed().map(|c| c.close);
        let reading = self
            .detector
            .measure(candle.close, candle.high, candle.low, previous_close);

        Ok(TickReport {
            date: candle.date(),
            close: candle.close,
            volume: candle.volume,
            short_sma: self.short_ma.with_in_progress(candle.close).ok(),
            long_sma: self.long_ma.with_in_progress(candle.close).ok(),
            reading,
            new_day,
        })
    }

    /// Runs the latches in their fixed order: volume, moves, MA cross.
    pub fn evaluate(&mut self, report: &TickReport) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if let Some(a) = self
            .latches
            .check_volume(report.volume, self.thresholds.volume_ceiling)
        {
            alerts.push(a);
        }

        if let Some(a) = self.latches.check_move(&self.detector, &report.reading) {
            alerts.push(a);
        }

        let cross = CrossoverInput {
            short_sma: report.short_sma,
            long_sma: report.long_sma,
            short_baseline: self.baseline.short_sma,
            long_baseline: self.baseline.long_sma,
            decimals: self.thresholds.crossover_decimals,
        };
        if let Some(a) = self.latches.check_crossover(&cross) {
            alerts.push(a);
        }

        alerts
    }

    /// Offers alerts to the dedup cache in order. Returns how many were emitted.
    pub fn dispatch(
        &mut self,
        alerts: &[Alert],
        sink: &dyn NotificationSink,
        display_seconds: u32,
    ) -> usize {
        alerts
            .iter()
            .filter(|a| {
                let emitted = self
                    .deduper
                    .offer(&a.to_notification(display_seconds), sink);
                if emitted {
                    info!(ticker = %self.ticker, alert = %a.message(), "alert emitted");
                }
                emitted
            })
            .count()
    }

    pub fn record_valuation(&mut self, value: f64) {
        self.valuations.push(value);
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn ipo_timestamp(&self) -> i64 {
        self.ipo_timestamp
    }

    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn latches(&self) -> &AnomalyLatches {
        &self.latches
    }

    pub fn deduper(&self) -> &NotificationDeduper {
        &self.deduper
    }

    pub fn valuations(&self) -> &[f64] {
        &self.valuations
    }
}
