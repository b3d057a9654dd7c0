pub mod finnhub;
pub mod fx;
pub mod notify;
