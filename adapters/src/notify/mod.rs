//! Notification sinks.

pub mod desktop;
pub mod log;

pub use desktop::DesktopNotifier;
pub use log::LogNotifier;
