use std::collections::BTreeMap;

use chrono::NaiveDate;
use corelib::Candle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("candle dated {candle} is not newer than closed history ending {last_closed}")]
    StaleCandle {
        candle: NaiveDate,
        last_closed: NaiveDate,
    },
}

/// Outcome of [`SeriesStore::upsert_today`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upsert {
    /// Same trading day: the in-progress entry was overwritten.
    Replaced,

    /// A new day started. `closed` is the previous in-progress entry,
    /// which is now immutable history.
    Appended { closed: Option<Candle> },
}

/// Date-keyed OHLCV history for one instrument.
///
/// Every entry is immutable history except the in-progress one ("today"),
/// which is always the most recent entry and is the only one
/// [`upsert_today`](Self::upsert_today) may overwrite.
///
/// Serializes as a bare `date -> candle` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesStore {
    entries: BTreeMap<NaiveDate, Candle>,

    #[serde(skip)]
    live: Option<NaiveDate>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds closed history from ascending candles. Candles sharing a
    /// calendar day collapse onto the last one seen.
    pub fn from_history(candles: &[Candle]) -> Self {
        let entries = candles.iter().map(|c| (c.date(), *c)).collect();
        Self {
            entries,
            live: None,
        }
    }

    /// Writes the in-progress candle for its calendar day.
    pub fn upsert_today(&mut self, candle: Candle) -> Result<Upsert, SeriesError> {
        let date = candle.date();

        if self.live == Some(date) {
            self.entries.insert(date, candle);
            return Ok(Upsert::Replaced);
        }

        if let Some(last) = self.last_date() {
            if date <= last {
                return Err(SeriesError::StaleCandle {
                    candle: date,
                    last_closed: last,
                });
            }
        }

        let closed = self
            .live
            .replace(date)
            .and_then(|prev| self.entries.get(&prev).copied());

        self.entries.insert(date, candle);

        Ok(Upsert::Appended { closed })
    }

    /// The in-progress entry, if a poll has written one.
    pub fn today(&self) -> Option<&Candle> {
        self.live.and_then(|d| self.entries.get(&d))
    }

    /// Most recent entry that is already history.
    pub fn last_closed(&self) -> Option<&Candle> {
        self.entries
            .iter()
            .rev()
            .find(|(date, _)| Some(**date) != self.live)
            .map(|(_, c)| c)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.entries.keys().next_back().copied()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&Candle> {
        self.entries.get(date)
    }

    /// All closes in chronological order, including the in-progress one.
    pub fn closes(&self) -> Vec<f64> {
        self.entries.values().map(|c| c.close).collect()
    }

    /// Closes of history only.
    pub fn closed_closes(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|(date, _)| Some(**date) != self.live)
            .map(|(_, c)| c.close)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Candle)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
