pub mod clock;
pub mod config;
pub mod controller;
pub mod error;

pub use clock::{Clock, SystemClock, until_next_tick};
pub use config::{MonitorConfig, RetryPolicy};
pub use controller::{PollController, PollOutcome};
pub use error::PollError;
