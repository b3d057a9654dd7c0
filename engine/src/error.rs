use corelib::MarketDataError;
use session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollError {
    #[error("fetch failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: MarketDataError,
    },

    #[error("session bootstrap failed: {0}")]
    Bootstrap(#[from] SessionError),

    #[error("fatal: {0}")]
    Fatal(String),
}
