/// Polarity of a moving-average cross.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossPolarity {
    /// Short SMA crossing above the long SMA.
    Golden,

    /// Short SMA crossing below the long SMA.
    Death,
}

impl CrossPolarity {
    /// Decided by the averages captured at session start, never by the
    /// live values at the moment of the cross.
    pub fn from_baseline(long_baseline: f64, short_baseline: f64) -> Self {
        if long_baseline < short_baseline {
            CrossPolarity::Golden
        } else {
            CrossPolarity::Death
        }
    }
}

/// True when both averages agree after rounding to `decimals` places.
pub fn averages_converged(short: f64, long: f64, decimals: u32) -> bool {
    let scale = 10f64.powi(decimals as i32);
    (short * scale).round() == (long * scale).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convergence_uses_rounded_values() {
        assert!(averages_converged(10.004, 9.996, 2));
        assert!(averages_converged(12.341, 12.344, 2));
        assert!(!averages_converged(12.34, 12.36, 2));
        assert!(!averages_converged(10.0, 10.1, 2));
        assert!(averages_converged(10.0, 10.4, 0));
    }

    #[test]
    fn polarity_follows_baseline_ordering() {
        assert_eq!(CrossPolarity::from_baseline(10.0, 12.0), CrossPolarity::Golden);
        assert_eq!(CrossPolarity::from_baseline(12.0, 10.0), CrossPolarity::Death);
        // equal baselines fall through to death cross
        assert_eq!(CrossPolarity::from_baseline(11.0, 11.0), CrossPolarity::Death);
    }
}
