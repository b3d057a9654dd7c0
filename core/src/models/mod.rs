pub mod candle;
pub mod notification;

pub use candle::{Candle, CandleBatch, CandleStatus, Resolution};
pub use notification::{AlertIcon, Notification};
