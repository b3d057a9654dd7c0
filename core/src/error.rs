use thiserror::Error;

/// Failure of a candle request against the market-data provider.
///
/// `status: no_data` is *not* an error: it arrives as a successful
/// `CandleBatch` with `CandleStatus::NoData`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    #[error("market data request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider fault: {0}")]
    Provider(String),

    #[error("malformed candle payload: {0}")]
    Malformed(String),
}

impl MarketDataError {
    /// Network-level hiccups as opposed to the provider rejecting the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_and_transport_errors_are_transient() {
        assert!(MarketDataError::Timeout.is_transient());
        assert!(MarketDataError::Transport("connection reset".into()).is_transient());
        assert!(!MarketDataError::Provider("401 unauthorized".into()).is_transient());
        assert!(!MarketDataError::Malformed("length mismatch".into()).is_transient());
    }
}
