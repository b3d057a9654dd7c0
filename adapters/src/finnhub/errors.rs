use corelib::MarketDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinnhubError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("finnhub returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("finnhub api error: {0}")]
    Api(String),

    #[error("invalid response from finnhub: {0}")]
    InvalidResponse(String),
}

impl From<FinnhubError> for MarketDataError {
    fn from(e: FinnhubError) -> Self {
        match e {
            FinnhubError::Http(err) if err.is_timeout() => MarketDataError::Timeout,
            FinnhubError::Http(err) if err.is_decode() => {
                MarketDataError::Malformed(err.to_string())
            }
            FinnhubError::Http(err) => MarketDataError::Transport(err.to_string()),
            other @ (FinnhubError::Status { .. } | FinnhubError::Api(_)) => {
                MarketDataError::Provider(other.to_string())
            }
            FinnhubError::InvalidResponse(msg) => MarketDataError::Malformed(msg),
        }
    }
}
