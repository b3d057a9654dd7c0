//! Currency conversion for position valuation.

pub mod fixed;
pub mod frankfurter;

pub use fixed::FixedRateConverter;
pub use frankfurter::{FrankfurterConverter, DEFAULT_FX_BASE_URL};
