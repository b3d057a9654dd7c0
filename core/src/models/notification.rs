use serde::{Deserialize, Serialize};

/// Icon shown next to a desktop notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertIcon {
    Up,
    Down,
    Neutral,
}

impl AlertIcon {
    /// File stem of the bundled icon.
    pub fn file_stem(&self) -> &'static str {
        match self {
            AlertIcon::Up => "up",
            AlertIcon::Down => "down",
            AlertIcon::Neutral => "v",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: AlertIcon,
    pub display_seconds: u32,
}
