pub mod error;
pub mod models;
pub mod provider;

pub use error::MarketDataError;
pub use models::*;
pub use provider::{CurrencyConverter, MarketDataProvider, NotificationSink};
