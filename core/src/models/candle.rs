use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One period's OHLCV summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix seconds of the period start, as reported by the provider.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// Calendar day (UTC) this candle belongs to.
    pub fn date(&self) -> NaiveDate {
        DateTime::from_timestamp(self.timestamp, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }

    /// Providers send all-zero placeholder candles for halted or missing
    /// periods. Those carry no price information.
    pub fn has_positive_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleStatus {
    Ok,
    NoData,
}

/// Provider response for one `(ticker, resolution, from, to)` request.
///
/// Candles are chronologically ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleBatch {
    pub status: CandleStatus,
    pub candles: Vec<Candle>,
}

impl CandleBatch {
    pub fn ok(candles: Vec<Candle>) -> Self {
        Self {
            status: CandleStatus::Ok,
            candles,
        }
    }

    pub fn no_data() -> Self {
        Self {
            status: CandleStatus::NoData,
            candles: Vec::new(),
        }
    }

    /// Healthy response carrying at least one candle.
    pub fn is_ok(&self) -> bool {
        self.status == CandleStatus::Ok && !self.candles.is_empty()
    }
}

/// Candle resolutions understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Minute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Minute => "1",
            Resolution::FiveMinutes => "5",
            Resolution::FifteenMinutes => "15",
            Resolution::ThirtyMinutes => "30",
            Resolution::Hour => "60",
            Resolution::Day => "D",
            Resolution::Week => "W",
            Resolution::Month => "M",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: i64) -> Candle {
        Candle {
            timestamp: ts,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 0,
        }
    }

    #[test]
    fn date_is_utc_calendar_day() {
        // 2019-10-28 20:00:00 UTC
        let c = candle(1_572_292_800);
        assert_eq!(c.date(), NaiveDate::from_ymd_opt(2019, 10, 28).unwrap());

        // one second before midnight stays on the same day
        let c = candle(1_572_307_199);
        assert_eq!(c.date(), NaiveDate::from_ymd_opt(2019, 10, 28).unwrap());
    }

    #[test]
    fn placeholder_candles_have_no_prices() {
        assert!(candle(0).has_positive_prices());

        let zero = Candle {
            close: 0.0,
            high: 0.0,
            low: 0.0,
            open: 0.0,
            ..candle(0)
        };
        assert!(!zero.has_positive_prices());

        let half = Candle {
            low: 0.0,
            close: 0.0,
            ..candle(0)
        };
        assert!(!half.has_positive_prices());
    }

    #[test]
    fn empty_ok_batch_is_not_healthy() {
        assert!(!CandleBatch::ok(vec![]).is_ok());
        assert!(!CandleBatch::no_data().is_ok());
        assert!(CandleBatch::ok(vec![candle(0)]).is_ok());
    }

    #[test]
    fn resolution_wire_codes() {
        assert_eq!(Resolution::Minute.to_string(), "1");
        assert_eq!(Resolution::Day.to_string(), "D");
        assert_eq!(Resolution::default(), Resolution::Day);
    }

    #[test]
    fn candle_serializes_with_field_names() {
        let json = serde_json::to_value(candle(10)).unwrap();
        assert_eq!(json["timestamp"], 10);
        assert_eq!(json["volume"], 0);
    }
}
