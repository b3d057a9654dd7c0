pub mod alert;
pub mod dedup;
pub mod latches;
pub mod model;
pub mod store;

pub use alert::Alert;
pub use dedup::NotificationDeduper;
pub use latches::{AnomalyLatches, Latch, LatchState};
pub use model::{Baseline, Session, SessionError, TickReport};
