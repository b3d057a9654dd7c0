pub mod pulse;
pub mod rolling_window;
pub mod series;
pub mod sma;
pub mod types;

pub use series::{SeriesError, SeriesStore, Upsert};
pub use sma::{MovingAverage, SmaError, compute_sma};
pub use types::{ThresholdError, Thresholds};
