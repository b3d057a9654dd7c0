//! Simple moving averages over a closing-price sequence.
//!
//! Two flavours share one definition (mean of the last `period` closes):
//! - [`compute_sma`] works on a slice and is used at bootstrap.
//! - [`MovingAverage`] keeps a running sum over closed days so each poll
//!   can fold in the in-progress close in O(1).

use thiserror::Error;

use crate::rolling_window::RollingWindow;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmaError {
    #[error("SMA period must be positive")]
    ZeroPeriod,

    #[error("SMA({period}) needs {period} closes, only {available} available")]
    InsufficientData { period: usize, available: usize },
}

/// Arithmetic mean of the last `period` entries of `closes`.
///
/// Callers that must leave out an in-progress day pass the slice without it.
pub fn compute_sma(closes: &[f64], period: usize) -> Result<f64, SmaError> {
    if period == 0 {
        return Err(SmaError::ZeroPeriod);
    }
    if closes.len() < period {
        return Err(SmaError::InsufficientData {
            period,
            available: closes.len(),
        });
    }

    let window = &closes[closes.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

/// Running SMA over closed-day closes.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    period: usize,
    closed: RollingWindow,
}

impl MovingAverage {
    pub fn new(period: usize) -> Result<Self, SmaError> {
        if period == 0 {
            return Err(SmaError::ZeroPeriod);
        }

        Ok(Self {
            period,
            closed: RollingWindow::new(period),
        })
    }

    /// Builds the engine from a closed-day history (oldest first).
    pub fn seeded(period: usize, closed_closes: &[f64]) -> Result<Self, SmaError> {
        let mut ma = Self::new(period)?;
        let start = closed_closes.len().saturating_sub(period);
        for close in &closed_closes[start..] {
            ma.push_closed(*close);
        }
        Ok(ma)
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Records the final close of a day that is now history.
    pub fn push_closed(&mut self, close: f64) {
        self.closed.push(close);
    }

    /// SMA over closed days only.
    pub fn closed_value(&self) -> Result<f64, SmaError> {
        self.closed.mean().ok_or(SmaError::InsufficientData {
            period: self.period,
            available: self.closed.len(),
        })
    }

    /// SMA whose window ends at the in-progress `close`
    /// (the last `period - 1` closed days plus today).
    pub fn with_in_progress(&self, close: f64) -> Result<f64, SmaError> {
        let available = self.closed.len() + 1;
        if available < self.period {
            return Err(SmaError::InsufficientData {
                period: self.period,
                available,
            });
        }

        let tail = if self.closed.is_full() {
            self.closed.sum() - self.closed.oldest().unwrap_or(0.0)
        } else {
            self.closed.sum()
        };

        Ok((tail + close) / self.period as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_of_last_window() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert!((compute_sma(&closes, 2).unwrap() - 4.5).abs() < EPS);
        assert!((compute_sma(&closes, 5).unwrap() - 3.0).abs() < EPS);
        assert!((compute_sma(&closes, 1).unwrap() - 5.0).abs() < EPS);
    }

    #[test]
    fn long_window_with_single_outlier() {
        // 199 tens then a 20
        let mut closes = vec![10.0; 199];
        closes.push(20.0);

        let sma = compute_sma(&closes, 200).unwrap();
        assert!((sma - 10.05).abs() < EPS);
    }

    #[test]
    fn excluding_the_in_progress_day_is_the_callers_slice() {
        let mut closes = vec![10.0; 199];
        closes.push(20.0);
        closes.push(1_000.0); // today, still trading

        let baseline = compute_sma(&closes[..closes.len() - 1], 200).unwrap();
        assert!((baseline - 10.05).abs() < EPS);
    }

    #[test]
    fn short_series_is_an_error_not_a_partial_mean() {
        let closes = vec![10.0; 49];

        assert_eq!(
            compute_sma(&closes, 50),
            Err(SmaError::InsufficientData {
                period: 50,
                available: 49
            })
        );
        assert_eq!(compute_sma(&closes, 0), Err(SmaError::ZeroPeriod));
    }

    #[test]
    fn running_average_matches_slice_average() {
        let history: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let ma = MovingAverage::seeded(10, &history).unwrap();

        assert!((ma.closed_value().unwrap() - compute_sma(&history, 10).unwrap()).abs() < EPS);

        let mut with_today = history.clone();
        with_today.push(100.0);
        let live = ma.with_in_progress(100.0).unwrap();
        assert!((live - compute_sma(&with_today, 10).unwrap()).abs() < EPS);
    }

    #[test]
    fn in_progress_close_counts_toward_the_window() {
        let ma = MovingAverage::seeded(3, &[2.0, 4.0]).unwrap();

        assert!(ma.closed_value().is_err());
        assert!((ma.with_in_progress(6.0).unwrap() - 4.0).abs() < EPS);

        let ma = MovingAverage::seeded(3, &[2.0]).unwrap();
        assert_eq!(
            ma.with_in_progress(6.0),
            Err(SmaError::InsufficientData {
                period: 3,
                available: 2
            })
        );
    }

    #[test]
    fn rollover_shifts_the_window() {
        let mut ma = MovingAverage::seeded(2, &[1.0, 3.0]).unwrap();
        assert!((ma.with_in_progress(5.0).unwrap() - 4.0).abs() < EPS);

        // today closes at 5, a new day starts at 7
        ma.push_closed(5.0);
        assert!((ma.closed_value().unwrap() - 4.0).abs() < EPS);
        assert!((ma.with_in_progress(7.0).unwrap() - 6.0).abs() < EPS);
    }

    #[test]
    fn period_one_is_the_latest_close() {
        let ma = MovingAverage::seeded(1, &[3.0, 8.0]).unwrap();

        assert!((ma.closed_value().unwrap() - 8.0).abs() < EPS);
        assert!((ma.with_in_progress(9.5).unwrap() - 9.5).abs() < EPS);
        assert_eq!(MovingAverage::new(0).unwrap_err(), SmaError::ZeroPeriod);
    }
}
