use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MOVE_TIERS_PCT: [f64; 3] = [10.0, 15.0, 20.0];
pub const DEFAULT_VOLUME_CEILING: u64 = 15_000_000;
pub const DEFAULT_SHORT_WINDOW: usize = 50;
pub const DEFAULT_LONG_WINDOW: usize = 200;
pub const DEFAULT_CROSSOVER_DECIMALS: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("move tiers must be positive and strictly ascending, got {0:?}")]
    MoveTiers([f64; 3]),

    #[error("SMA windows must satisfy 0 < short ({short}) < long ({long})")]
    Windows { short: usize, long: usize },
}

/// Alerting configuration. Fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Intraday move tiers in percent, evaluated in ascending order.
    pub move_tiers_pct: [f64; 3],

    /// Daily volume strictly above this trips the volume latch.
    pub volume_ceiling: u64,

    pub short_window: usize,
    pub long_window: usize,

    /// Decimal places both SMAs are rounded to before testing for a cross.
    pub crossover_decimals: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            move_tiers_pct: DEFAULT_MOVE_TIERS_PCT,
            volume_ceiling: DEFAULT_VOLUME_CEILING,
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            crossover_decimals: DEFAULT_CROSSOVER_DECIMALS,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let [a, b, c] = self.move_tiers_pct;
        if !(a > 0.0 && a < b && b < c) {
            return Err(ThresholdError::MoveTiers(self.move_tiers_pct));
        }

        if self.short_window == 0 || self.short_window >= self.long_window {
            return Err(ThresholdError::Windows {
                short: self.short_window,
                long: self.long_window,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let t = Thresholds::default();

        assert!(t.validate().is_ok());
        assert_eq!(t.move_tiers_pct, [10.0, 15.0, 20.0]);
        assert_eq!(t.volume_ceiling, 15_000_000);
        assert_eq!((t.short_window, t.long_window), (50, 200));
    }

    #[test]
    fn rejects_unordered_tiers() {
        let t = Thresholds {
            move_tiers_pct: [15.0, 10.0, 20.0],
            ..Thresholds::default()
        };
        assert!(matches!(t.validate(), Err(ThresholdError::MoveTiers(_))));

        let t = Thresholds {
            move_tiers_pct: [0.0, 10.0, 20.0],
            ..Thresholds::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn rejects_inverted_windows() {
        let t = Thresholds {
            short_window: 200,
            long_window: 50,
            ..Thresholds::default()
        };
        assert_eq!(
            t.validate(),
            Err(ThresholdError::Windows {
                short: 200,
                long: 50
            })
        );
    }
}
