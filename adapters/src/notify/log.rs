use corelib::{Notification, NotificationSink};
use tracing::info;

/// Writes alerts to the log instead of the desktop. Used headless and in CI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            title = %notification.title,
            icon = notification.icon.file_stem(),
            display_seconds = notification.display_seconds,
            "notification: {}",
            notification.message
        );
        Ok(())
    }
}
