//! Finnhub REST adapter for `stock/candle`.

pub mod client;
pub mod errors;
pub mod types;

pub use client::FinnhubClient;
pub use errors::FinnhubError;
pub use types::CandleEnvelope;
